use anyhow::{Context, Result};
use database::{ConnectionProvider, SqliteRoomRepository, SqliteRoommateRepository};
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Both repositories, sharing one connection provider
#[derive(Debug, Clone)]
pub struct Repositories {
    pub rooms: SqliteRoomRepository,
    pub roommates: SqliteRoommateRepository,
}

/// Build the repositories and make sure the schema exists
pub async fn create_repositories(config: &Config) -> Result<Repositories> {
    info!("Creating repositories");

    let provider = ConnectionProvider::new(&config.database_config())
        .context("Failed to configure database connection")?;
    info!("Using database URL: {}", provider.url());

    provider
        .migrate()
        .await
        .context("Failed to bootstrap database schema")?;

    Ok(Repositories {
        rooms: SqliteRoomRepository::with_provider(provider.clone()),
        roommates: SqliteRoommateRepository::with_provider(provider),
    })
}

/// Ensure the database directory exists using config
pub fn ensure_database_directory_from_config(config: &Config) -> Result<()> {
    ensure_database_directory(&config.database.url)
}

/// Create the parent directory of a file-backed SQLite URL
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(db_path) = database_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}

/// File path portion of a SQLite URL, without query parameters
fn database_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    (!path.is_empty() && path != ":memory:").then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path() {
        assert_eq!(database_path("sqlite://data/r.db"), Some("data/r.db"));
        assert_eq!(database_path("sqlite:r.db?mode=rwc"), Some("r.db"));
        assert_eq!(database_path("sqlite::memory:"), None);
        assert_eq!(database_path("postgres://localhost/db"), None);
    }

    #[test]
    fn test_ensure_database_directory_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let url = format!("sqlite://{}/house.sqlite", nested.display());

        ensure_database_directory(&url).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_database_directory(&url).unwrap();
    }
}
