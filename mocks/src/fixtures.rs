//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - A small household of rooms and roommates
//! - The Bathroom/Washroom walkthrough records

use chrono::{NaiveDate, NaiveDateTime};
use roommates_core::{Room, Roommate};

/// Midnight on the given day, as stored in the MoveInDate column
pub fn move_in_date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// A room that has not been inserted yet
pub fn bathroom() -> Room {
    Room::new("Bathroom", 3)
}

/// Second unsaved room, used next to [`bathroom`]
pub fn lavatory() -> Room {
    Room::new("Lavatory", 12)
}

/// The update applied to the bathroom once it has an id
pub fn washroom(id: i32) -> Room {
    Room::with_id(id, "Washroom", 15)
}

/// Rooms of the standard household, ids 1..=3
pub fn standard_rooms() -> Vec<Room> {
    vec![
        Room::with_id(1, "Front Bedroom", 2),
        Room::with_id(2, "Attic", 1),
        Room::with_id(3, "Basement", 3),
    ]
}

/// Roommates of the standard household, ids 1..=4
///
/// Room 1 holds two roommates, rooms 2 and 3 one each.
pub fn standard_roommates() -> Vec<Roommate> {
    vec![
        Roommate::new(1, "Jenna", "Solis", 20, move_in_date(2020, 1, 15), 1),
        Roommate::new(2, "Dom", "Reyes", 30, move_in_date(2020, 3, 1), 1),
        Roommate::new(3, "Mia", "Park", 25, move_in_date(2021, 6, 30), 2),
        Roommate::new(4, "Theo", "Grant", 25, move_in_date(2022, 9, 12), 3),
    ]
}

/// Roommates of the standard household living in `room_id`
pub fn standard_roommates_in(room_id: i32) -> Vec<Roommate> {
    standard_roommates()
        .into_iter()
        .filter(|roommate| roommate.room_id == room_id)
        .collect()
}
