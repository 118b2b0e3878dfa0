//! Database crate for the Roommates data-access layer
//!
//! This crate provides SQLite implementations of the `RoomRepository` and
//! `RoommateRepository` traits. There is no connection pool: every
//! repository call opens its own connection through a [`ConnectionProvider`],
//! runs one statement and releases the connection before returning.
//!
//! # Features
//!
//! - Parameterized statements only, including the Roommate/Room join filter
//! - Embedded schema bootstrap for the Room and Roommate tables
//! - Foreign keys enforced on every connection
//! - Errors mapped onto connection, statement and mapping failures
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::{DatabaseConfig, SqliteRoomRepository, SqliteRoommateRepository};
//! use roommates_core::repository::{RoomRepository, RoommateRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("sqlite://roommates.sqlite");
//!     let rooms = SqliteRoomRepository::new(&config)?;
//!     let roommates = SqliteRoommateRepository::new(&config)?;
//!
//!     // Create the tables if needed
//!     rooms.provider().migrate().await?;
//!
//!     for room in rooms.get_all().await? {
//!         println!("{room}");
//!     }
//!     for roommate in roommates.get_all_with_room(1).await? {
//!         println!("{} {}", roommate.full_name(), roommate.room_name().unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

mod common;
mod connection;
mod room_repository;
mod roommate_repository;

pub use connection::{ConnectionProvider, DatabaseConfig, DEFAULT_BUSY_TIMEOUT_SECS};
pub use room_repository::SqliteRoomRepository;
pub use roommate_repository::SqliteRoommateRepository;

// Re-export commonly used types from roommates-core for convenience
pub use roommates_core::{
    error::{Result, RoommatesError},
    models::{Room, Roommate},
    repository::{RoomRepository, RoommateRepository},
};
