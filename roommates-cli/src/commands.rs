//! Subcommands of the `roommates` binary
//!
//! Every command is generic over the repository traits and writes to any
//! [`Write`], so the same code drives SQLite in the binary and the mocks in tests.

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use roommates_core::{Room, RoomRepository, Roommate, RoommateRepository, RoommatesError};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tracing::info;

const DEMO_ROOM_ID: i32 = 1;
const DEMO_ROOMMATE_ID: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One record per line
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Walk through every repository operation against the configured database
    Demo,
    /// Manage rooms
    Rooms {
        #[command(subcommand)]
        command: RoomCommand,
    },
    /// Look up roommates
    Roommates {
        #[command(subcommand)]
        command: RoommateCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RoomCommand {
    /// List all rooms
    List,
    /// Show one room
    Get { id: i32 },
    /// Add a room and print its new id
    Add { name: String, max_occupancy: i32 },
    /// Overwrite the name and occupancy of a room
    Update {
        id: i32,
        name: String,
        max_occupancy: i32,
    },
    /// Delete a room
    Delete { id: i32 },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RoommateCommand {
    /// List all roommates
    List,
    /// Show one roommate
    Get { id: i32 },
    /// List the roommates assigned to a room, with the room's name
    InRoom { room_id: i32 },
}

/// Dispatch a parsed subcommand
pub async fn execute<R, M, W>(
    command: &Command,
    rooms: &R,
    roommates: &M,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    R: RoomRepository,
    M: RoommateRepository,
    W: Write,
{
    match command {
        Command::Demo => run_demo(rooms, roommates, format, out).await,
        Command::Rooms { command } => run_room_command(command, rooms, format, out).await,
        Command::Roommates { command } => {
            run_roommate_command(command, roommates, format, out).await
        }
    }
}

pub async fn run_room_command<R: RoomRepository, W: Write>(
    command: &RoomCommand,
    rooms: &R,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match command {
        RoomCommand::List => {
            let all = rooms.get_all().await.context("Failed to list rooms")?;
            write_records(out, format, &all)
        }
        RoomCommand::Get { id } => {
            let room = rooms
                .get_by_id(*id)
                .await
                .with_context(|| format!("Failed to get room {id}"))?;
            write_optional(out, format, room.as_ref(), || {
                RoommatesError::room_not_found(*id)
            })
        }
        RoomCommand::Add {
            name,
            max_occupancy,
        } => {
            let mut room = Room::new(name.as_str(), *max_occupancy);
            rooms
                .insert(&mut room)
                .await
                .with_context(|| format!("Failed to add room '{name}'"))?;
            info!(id = room.id, "Room added");

            match format {
                OutputFormat::Text => writeln!(out, "Added the new Room with id {}", room.id)?,
                OutputFormat::Json => write_json(out, &room)?,
            }
            Ok(())
        }
        RoomCommand::Update {
            id,
            name,
            max_occupancy,
        } => {
            let room = Room::with_id(*id, name.as_str(), *max_occupancy);
            let rows_affected = rooms
                .update(&room)
                .await
                .with_context(|| format!("Failed to update room {id}"))?;
            write_change(out, format, "Updated", *id, rows_affected)
        }
        RoomCommand::Delete { id } => {
            let rows_affected = rooms
                .delete(*id)
                .await
                .with_context(|| format!("Failed to delete room {id}"))?;
            write_change(out, format, "Deleted", *id, rows_affected)
        }
    }
}

pub async fn run_roommate_command<M: RoommateRepository, W: Write>(
    command: &RoommateCommand,
    roommates: &M,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match command {
        RoommateCommand::List => {
            let all = roommates
                .get_all()
                .await
                .context("Failed to list roommates")?;
            write_records(out, format, &all)
        }
        RoommateCommand::Get { id } => {
            let roommate = roommates
                .get_by_id(*id)
                .await
                .with_context(|| format!("Failed to get roommate {id}"))?;
            write_optional(out, format, roommate.as_ref(), || {
                RoommatesError::roommate_not_found(*id)
            })
        }
        RoommateCommand::InRoom { room_id } => {
            let residents = roommates
                .get_all_with_room(*room_id)
                .await
                .with_context(|| format!("Failed to list roommates in room {room_id}"))?;
            match format {
                OutputFormat::Text => write_residents(out, &residents),
                OutputFormat::Json => write_json(out, &residents),
            }
        }
    }
}

/// Read every roommate, then exercise insert, update and delete on a scratch room
pub async fn run_demo<R, M, W>(
    rooms: &R,
    roommates: &M,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    R: RoomRepository,
    M: RoommateRepository,
    W: Write,
{
    let all_roommates = roommates
        .get_all()
        .await
        .context("Failed to list roommates")?;
    let single = roommates
        .get_by_id(DEMO_ROOMMATE_ID)
        .await
        .context("Failed to get roommate")?;
    let residents = roommates
        .get_all_with_room(DEMO_ROOM_ID)
        .await
        .context("Failed to list roommates in room")?;
    let rooms_before = rooms.get_all().await.context("Failed to list rooms")?;

    let mut bathroom = Room::new("Bathroom", 3);
    rooms
        .insert(&mut bathroom)
        .await
        .context("Failed to add the Bathroom")?;

    let washroom = Room::with_id(bathroom.id, "Washroom", 15);
    let updated = rooms
        .update(&washroom)
        .await
        .context("Failed to rename the Bathroom")?;
    let deleted = rooms
        .delete(washroom.id)
        .await
        .context("Failed to delete the Washroom")?;

    let rooms_after = rooms.get_all().await.context("Failed to list rooms")?;
    info!(room_id = bathroom.id, updated, deleted, "Demo finished");

    if format == OutputFormat::Json {
        return write_json(
            out,
            &json!({
                "roommates": all_roommates,
                "roommate": single,
                "roommates_in_room": residents,
                "rooms_before": rooms_before,
                "inserted": bathroom,
                "updated": updated,
                "deleted": deleted,
                "rooms_after": rooms_after,
            }),
        );
    }

    writeln!(out, "Getting All Roommates:")?;
    writeln!(out)?;
    write_lines(out, &all_roommates)?;

    writeln!(out, "----------------------------")?;
    writeln!(out, "Getting Roommate with Id {DEMO_ROOMMATE_ID}")?;
    match &single {
        Some(r) => writeln!(out, "{} {} {}", r.id, r.first_name, r.last_name)?,
        None => writeln!(out, "{}", RoommatesError::roommate_not_found(DEMO_ROOMMATE_ID))?,
    }

    writeln!(out, "----------------")?;
    writeln!(out, "Roommates in Room {DEMO_ROOM_ID}:")?;
    write_residents(out, &residents)?;

    writeln!(out, "----------------")?;
    writeln!(out, "Getting All Rooms:")?;
    writeln!(out)?;
    write_lines(out, &rooms_before)?;

    writeln!(out, "-------------------------------")?;
    writeln!(out, "Added the new Room with id {}", bathroom.id)?;
    writeln!(out, "-------------------------------")?;
    writeln!(out, "Updating Room with id {} ({updated} row)", bathroom.id)?;
    writeln!(out, "Deleting Room with id {} ({deleted} row)", bathroom.id)?;
    writeln!(out, "-------------------------------")?;
    write_lines(out, &rooms_after)?;

    Ok(())
}

fn write_records<T, W>(out: &mut W, format: OutputFormat, records: &[T]) -> Result<()>
where
    T: Serialize + std::fmt::Display,
    W: Write,
{
    match format {
        OutputFormat::Text => write_lines(out, records),
        OutputFormat::Json => write_json(out, &records),
    }
}

fn write_optional<T, W, F>(
    out: &mut W,
    format: OutputFormat,
    record: Option<&T>,
    missing: F,
) -> Result<()>
where
    T: Serialize + std::fmt::Display,
    W: Write,
    F: FnOnce() -> RoommatesError,
{
    match (format, record) {
        (OutputFormat::Text, Some(record)) => writeln!(out, "{record}")?,
        (OutputFormat::Text, None) => writeln!(out, "{}", missing())?,
        (OutputFormat::Json, record) => write_json(out, &record)?,
    }
    Ok(())
}

fn write_change<W: Write>(
    out: &mut W,
    format: OutputFormat,
    action: &str,
    id: i32,
    rows_affected: u64,
) -> Result<()> {
    match format {
        OutputFormat::Text if rows_affected == 0 => {
            writeln!(out, "No Room with id {id}; nothing changed")?
        }
        OutputFormat::Text => writeln!(out, "{action} Room with id {id}")?,
        OutputFormat::Json => write_json(out, &json!({ "id": id, "rows_affected": rows_affected }))?,
    }
    Ok(())
}

fn write_residents<W: Write>(out: &mut W, residents: &[Roommate]) -> Result<()> {
    for roommate in residents {
        writeln!(
            out,
            "{} {} {}",
            roommate.first_name,
            roommate.last_name,
            roommate.room_name().unwrap_or_default()
        )?;
    }
    Ok(())
}

fn write_lines<T: std::fmt::Display, W: Write>(out: &mut W, records: &[T]) -> Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized, W: Write>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
