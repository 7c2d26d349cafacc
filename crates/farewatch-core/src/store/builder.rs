//! Builder for creating and configuring FareStore instances.

use std::path::{Path, PathBuf};

use log::info;

use super::FareStore;
use crate::{config::StoreConfig, error::Result};

/// Builder for creating and configuring FareStore instances.
///
/// Configuration is resolved in order: an explicit [`StoreConfig`], then a
/// config file, then defaults. A database path set on the builder overrides
/// whichever of those applies; without one, the XDG data directory is used.
#[derive(Debug, Clone, Default)]
pub struct FareStoreBuilder {
    config: Option<StoreConfig>,
    config_file: Option<PathBuf>,
    database_path: Option<PathBuf>,
}

impl FareStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already-built configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Reads configuration from a JSON file such as `param.json`.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_file = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/farewatch/farewatch.db` or
    /// `~/.local/share/farewatch/farewatch.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Resolves the configuration, opens the store once and ensures its
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileSystem` or `StoreError::Configuration` if the
    /// config file cannot be read, `StoreError::XdgDirectory` if the default
    /// location cannot be created, and any connection or schema error from
    /// opening the store.
    pub fn build(self) -> Result<FareStore> {
        let mut config = match (self.config, self.config_file) {
            (Some(config), _) => config,
            (None, Some(path)) => StoreConfig::from_file(path)?,
            (None, None) => match &self.database_path {
                Some(path) => StoreConfig::new(path),
                None => StoreConfig::with_default_location()?,
            },
        };

        if let Some(path) = self.database_path {
            config.database = path;
        }
        config.validate()?;

        let store = FareStore::new(config);
        store.open()?.close()?;
        info!("Fare store ready at {}", store.config.database.display());

        Ok(store)
    }
}
