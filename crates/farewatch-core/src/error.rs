//! Error types for the fare store.

use std::fmt;
use std::path::PathBuf;

use rusqlite::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of record a foreign key can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Carrier,
    Airport,
    Route,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Carrier => write!(f, "Carrier"),
            Entity::Airport => write!(f, "Airport"),
            Entity::Route => write!(f, "Route"),
        }
    }
}

/// Comprehensive error type for all store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be opened or is not a usable SQLite database
    #[error("Cannot connect to store at '{path}': {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    /// An existing schema is incompatible with this version of the store
    #[error("Incompatible schema for '{table}': {reason}")]
    Schema { table: String, reason: String },
    /// Malformed input record, rejected before anything was written
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// A referenced record does not exist yet
    #[error("{entity} with ID {id} not found")]
    Referential { entity: Entity, id: u64 },
    /// Another connection holds the write lock
    #[error("Store is busy: {message}")]
    Busy {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Any other engine failure
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source. Lock contention becomes
    /// [`StoreError::Busy`] so callers can retry it.
    pub fn with_source(self, source: rusqlite::Error) -> StoreError {
        if is_lock_contention(&source) {
            StoreError::Busy {
                message: self.message,
                source,
            }
        } else {
            StoreError::Database {
                message: self.message,
                source,
            }
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> StoreError {
        StoreError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl StoreError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Shorthand for a missing foreign-key target.
    pub fn missing(entity: Entity, id: u64) -> Self {
        StoreError::Referential { entity, id }
    }

    /// Whether the failed operation may succeed if simply tried again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Busy { .. })
    }
}

pub(crate) fn is_lock_contention(error: &rusqlite::Error) -> bool {
    matches!(
        error.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    )
}

/// Extension trait mapping config file failures to
/// [`StoreError::Configuration`].
pub trait ConfigResultExt<T> {
    /// Prefix the error with `context` and report it as a configuration error.
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| StoreError::Configuration {
            message: format!("{context}: {e}"),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| StoreError::database(message).with_source(e))
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
