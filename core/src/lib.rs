//! Roommates Core Library
//!
//! This crate provides the domain records, error taxonomy and repository
//! traits for the Room/Roommate data-access layer. The `database` crate
//! implements the traits against SQLite and the `mocks` crate implements
//! them in memory.
//!
//! # Architecture
//!
//! - [`models`] - `Room` and `Roommate` records
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository traits for data access
//!
//! # Example
//!
//! ```rust
//! use roommates_core::{Room, RoommatesError};
//!
//! let mut room = Room::new("Bathroom", 3);
//! room.id = 12;
//! assert!(room.is_persisted());
//!
//! let err = RoommatesError::room_not_found(room.id);
//! assert!(err.is_not_found());
//! ```

pub mod error;
pub mod models;
pub mod repository;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, RoommatesError};
pub use models::{Room, Roommate};
pub use repository::{RoomRepository, RoommateRepository};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
