use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use database::DEFAULT_BUSY_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseSettings {
    /// SQLite connection string
    pub url: String,
    /// Seconds a statement waits on a locked database
    pub busy_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration from the embedded defaults, `CONFIG_FILE` and the environment
    pub fn from_env() -> Result<Self> {
        let config_file = env::var("CONFIG_FILE").ok();
        Self::load(config_file.as_deref(), false)
    }

    /// Load configuration from a specific file path layered over the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path), true)
    }

    fn load(config_file: Option<&str>, required: bool) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = config_file {
            builder = builder.add_source(
                File::with_name(path)
                    .required(required)
                    .format(FileFormat::Toml),
            );
        }

        // ROOMMATES_DATABASE__URL, ROOMMATES_LOGGING__LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("ROOMMATES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Apply DATABASE_URL and LOG_LEVEL on top of everything else
    fn apply_standard_env_vars(config: &mut Config) {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database.url = database_url;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.logging.level = log_level;
        }
    }

    pub fn merge_with_env(mut self) -> Result<Self> {
        Self::apply_standard_env_vars(&mut self);
        Ok(self)
    }

    /// Connection settings handed to the repositories
    pub fn database_config(&self) -> database::DatabaseConfig {
        database::DatabaseConfig {
            url: self.database.url.clone(),
            busy_timeout_secs: self.database.busy_timeout_secs,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if !self.database.url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "Only SQLite databases are supported. URL must start with 'sqlite:'. Got: {}",
                self.database.url
            ));
        }

        if self.database.busy_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "Database busy_timeout_secs must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                url: "sqlite://roommates.sqlite".to_string(),
                busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}
