//! Mock implementations and test utilities for the Roommates data-access layer
//!
//! This crate provides testing infrastructure including:
//! - In-memory implementations of both repository traits
//! - Standard fixtures and fluent builders
//! - Random data generators and property-based strategies
//! - Contract test helpers shared by every implementation

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::{MockRoomRepository, MockRoommateRepository};
