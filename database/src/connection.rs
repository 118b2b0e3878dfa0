use crate::common::sqlx_error_to_roommates_error;
use roommates_core::error::{Result, RoommatesError};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode},
    ConnectOptions, Connection,
};
use std::{str::FromStr, time::Duration};

/// Default SQLite busy timeout, in seconds
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

/// Connection settings injected into every repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite connection string (`sqlite://path`, `sqlite:path` or a bare file path)
    pub url: String,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
        }
    }
}

/// Opens a fresh SQLite connection for every repository call.
///
/// There is no pool: each caller opens, uses and releases its own
/// connection. [`release`](Self::release) closes a connection explicitly;
/// a connection dropped on an early return is closed by its `Drop`, so the
/// handle never outlives the call that acquired it.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    url: String,
    options: SqliteConnectOptions,
}

impl ConnectionProvider {
    /// Parse the connection string once and keep the resulting options
    ///
    /// # Returns
    /// * `Ok(ConnectionProvider)` - Ready to open connections
    /// * `Err(RoommatesError::Configuration)` - If the URL cannot be parsed, or
    ///   names an in-memory database (it would vanish with every connection)
    ///
    /// # Examples
    /// ```rust
    /// use database::{ConnectionProvider, DatabaseConfig};
    ///
    /// let provider = ConnectionProvider::new(&DatabaseConfig::new("/tmp/roommates.sqlite")).unwrap();
    /// assert_eq!(provider.url(), "sqlite:///tmp/roommates.sqlite");
    ///
    /// assert!(ConnectionProvider::new(&DatabaseConfig::new(":memory:")).is_err());
    /// ```
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let url = normalize_url(&config.url);

        if url.contains(":memory:") || url.contains("mode=memory") {
            return Err(RoommatesError::Configuration(format!(
                "In-memory databases are not supported with per-call connections: {url}"
            )));
        }

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| {
                RoommatesError::Configuration(format!("Invalid connection string '{url}': {e}"))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .foreign_keys(true);

        Ok(Self { url, options })
    }

    /// Normalized connection string
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open a new connection
    ///
    /// Every failure here is reported as [`RoommatesError::Connection`], including
    /// errors SQLite raises while opening the file.
    pub async fn open(&self) -> Result<SqliteConnection> {
        let conn = self.options.connect().await.map_err(|e| {
            tracing::error!(url = %self.url, error = %e, "Failed to open database connection");
            RoommatesError::Connection(format!("Failed to open '{}': {e}", self.url))
        })?;

        tracing::trace!(url = %self.url, "Database connection opened");
        Ok(conn)
    }

    /// Close a connection that finished its work
    pub async fn release(&self, conn: SqliteConnection) -> Result<()> {
        conn.close().await.map_err(sqlx_error_to_roommates_error)?;
        tracing::trace!(url = %self.url, "Database connection released");
        Ok(())
    }

    /// Create the Room and Roommate tables when they are absent
    pub async fn migrate(&self) -> Result<()> {
        let mut conn = self.open().await?;

        sqlx::migrate!("./migrations/sqlite")
            .run(&mut conn)
            .await
            .map_err(|e| RoommatesError::Statement(format!("Schema bootstrap failed: {e}")))?;

        self.release(conn).await?;
        tracing::info!(url = %self.url, "Database schema is up to date");
        Ok(())
    }

    /// Verify the database can be opened and queried
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.open().await?;

        sqlx::query("SELECT 1")
            .fetch_one(&mut conn)
            .await
            .map_err(sqlx_error_to_roommates_error)?;

        self.release(conn).await
    }
}

/// Bring bare paths and `:memory:` shorthands into `sqlite:` URL form
fn normalize_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{database_url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("sqlite://data/r.db"), "sqlite://data/r.db");
        assert_eq!(normalize_url("sqlite:r.db"), "sqlite:r.db");
        assert_eq!(normalize_url("data/r.db"), "sqlite://data/r.db");
        assert_eq!(normalize_url(":memory:"), "sqlite::memory:");
    }

    #[test]
    fn test_in_memory_database_is_rejected() {
        for url in [":memory:", "sqlite::memory:", "sqlite://file:shared?mode=memory"] {
            let err = ConnectionProvider::new(&DatabaseConfig::new(url)).unwrap_err();
            assert!(
                matches!(err, RoommatesError::Configuration(_)),
                "expected configuration error for {url}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_default_busy_timeout() {
        let config = DatabaseConfig::new("roommates.sqlite");
        assert_eq!(config.busy_timeout_secs, DEFAULT_BUSY_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.sqlite");
        let provider =
            ConnectionProvider::new(&DatabaseConfig::new(path.display().to_string())).unwrap();

        let conn = provider.open().await.unwrap();
        provider.release(conn).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_open_failure_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("nested").join("r.sqlite");
        let provider =
            ConnectionProvider::new(&DatabaseConfig::new(path.display().to_string())).unwrap();

        let err = provider.open().await.unwrap_err();
        assert!(err.is_connection(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sqlite");
        let provider =
            ConnectionProvider::new(&DatabaseConfig::new(path.display().to_string())).unwrap();

        provider.migrate().await.unwrap();
        provider.migrate().await.unwrap();
        provider.health_check().await.unwrap();
    }
}
