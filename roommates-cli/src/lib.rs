//! Roommates command-line library
//!
//! Configuration loading, telemetry, database setup and the subcommands of
//! the `roommates` binary. Exposed as a library so integration tests can
//! drive the commands against mock repositories.

pub mod commands;
pub mod config;
pub mod setup;
pub mod telemetry;

pub use commands::{execute, run_demo, Command, OutputFormat, RoomCommand, RoommateCommand};
pub use config::Config;
pub use setup::{create_repositories, ensure_database_directory, Repositories};
pub use telemetry::init_telemetry;

use roommates_core::RoommatesError;

/// Exit code for a failed run
///
/// Uses the repository error category when one is in the chain and `1` otherwise.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<RoommatesError>())
        .map(RoommatesError::exit_code)
        .unwrap_or(1)
}
