//! Store configuration loaded from a JSON file such as `param.json`.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigResultExt, Result, StoreError},
    models::validate_currency,
};

/// Schema version written by this release of the store.
pub const SCHEMA_VERSION: u32 = 1;

/// Currency tag applied to quotes that do not carry one.
pub const DEFAULT_CURRENCY: &str = "GBP";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_busy_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    50
}

/// Settings for locating and talking to the fare store.
///
/// Only `database` is required when reading from a file; every other key
/// falls back to its default and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the SQLite file
    pub database: PathBuf,

    /// Currency tag for quotes submitted without one
    #[serde(default = "default_currency")]
    pub currency_default: String,

    /// Schema version the caller expects to find in the store
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How long a connection waits on a locked store before giving up
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Extra attempts [`crate::FareStore::with_database`] makes after a busy
    /// failure
    #[serde(default = "default_busy_retries")]
    pub busy_retries: u32,

    /// First backoff delay between busy retries; doubles on every attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl StoreConfig {
    /// Creates a configuration for the given database file with defaults for
    /// everything else.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            currency_default: default_currency(),
            schema_version: default_schema_version(),
            busy_timeout_ms: default_busy_timeout_ms(),
            busy_retries: default_busy_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }

    /// Creates a configuration pointing at the XDG data directory:
    /// `$XDG_DATA_HOME/farewatch/farewatch.db`.
    pub fn with_default_location() -> Result<Self> {
        Ok(Self::new(Self::default_database_path()?))
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| StoreError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)
            .config_context(format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde alone cannot.
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            return Err(StoreError::Configuration {
                message: "database path must not be empty".to_string(),
            });
        }
        validate_currency("currency_default", &self.currency_default).map_err(|e| {
            StoreError::Configuration {
                message: e.to_string(),
            }
        })?;
        if self.schema_version == 0 {
            return Err(StoreError::Configuration {
                message: "schema_version must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Busy timeout as a [`Duration`].
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Delay before the given retry attempt (0-based).
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("farewatch")
            .place_data_file("farewatch.db")
            .map_err(|e| StoreError::XdgDirectory(e.to_string()))
    }
}
