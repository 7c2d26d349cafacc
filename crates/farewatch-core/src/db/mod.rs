//! Database operations and SQLite management for the fare store.
//!
//! A [`Database`] owns one SQLite connection and is the handle every store
//! operation is called on. Dropping it releases the connection on every exit
//! path; [`Database::close`] does the same but reports close failures.
//!
//! Queries are split by entity:
//!
//! - [`schema`]: table creation, compatibility checks, table listing
//! - [`carrier_queries`], [`airport_queries`]: idempotent upserts and reads
//! - [`route_queries`]: routes and their ordered layovers
//! - [`quote_queries`]: append-only quotes and filtered, restartable reads
//! - [`batch`]: multi-entity writes in dependency order
//!
//! Every write runs in its own `IMMEDIATE` transaction, so a failed write
//! leaves nothing behind and a writer holds the lock for the whole unit.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Type, Connection, Row, Transaction, TransactionBehavior};

use crate::{
    config::StoreConfig,
    error::{is_lock_contention, DatabaseResultExt, Entity, Result, StoreError},
};

pub mod airport_queries;
pub mod batch;
pub mod carrier_queries;
pub mod quote_queries;
pub mod route_queries;
pub mod schema;

pub use quote_queries::QuoteQuery;

const CARRIER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM CARRIER WHERE carrier_id = ?1)";
const AIRPORT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM AIRPORT WHERE airport_id = ?1)";
const ROUTE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM ROUTE WHERE route_id = ?1)";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
    path: PathBuf,
    currency_default: String,
    schema_version: u32,
}

impl Database {
    /// Opens the store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] when the file cannot be opened or
    /// is not a SQLite database, and [`StoreError::Busy`] when another
    /// connection keeps it locked past the busy timeout.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let path = config.database.clone();
        let connection = Connection::open(&path).map_err(|source| StoreError::Connection {
            path: path.clone(),
            source,
        })?;

        connection
            .busy_timeout(config.busy_timeout())
            .db_context("Failed to set busy timeout")?;

        // SQLite opens lazily; the first read is what detects a corrupt file.
        connection
            .query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|source| {
                if is_lock_contention(&source) {
                    StoreError::Busy {
                        message: format!("Store at '{}' is locked", path.display()),
                        source,
                    }
                } else {
                    StoreError::Connection {
                        path: path.clone(),
                        source,
                    }
                }
            })?;

        connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        debug!("Connected to fare store at {}", path.display());

        Ok(Self {
            connection,
            path,
            currency_default: config.currency_default.clone(),
            schema_version: config.schema_version,
        })
    }

    /// Closes the connection, surfacing any error SQLite reports.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.connection
            .close()
            .map_err(|(_, source)| StoreError::Connection { path, source })?;
        debug!("Closed fare store connection");
        Ok(())
    }

    /// Rows inserted, updated or deleted through this connection since it
    /// was opened, including those of statements later rolled back.
    pub fn total_changes(&self) -> u64 {
        self.connection.total_changes()
    }

    /// Path of the underlying store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Currency applied to quotes submitted without one.
    pub fn currency_default(&self) -> &str {
        &self.currency_default
    }
}

/// Starts a write transaction that takes the write lock up front.
fn begin_write(connection: &mut Connection) -> Result<Transaction<'_>> {
    connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .db_context("Failed to begin transaction")
}

/// Fails with [`StoreError::Referential`] unless the referenced row exists.
fn require(connection: &Connection, entity: Entity, id: u64) -> Result<()> {
    let sql = match entity {
        Entity::Carrier => CARRIER_EXISTS_SQL,
        Entity::Airport => AIRPORT_EXISTS_SQL,
        Entity::Route => ROUTE_EXISTS_SQL,
    };
    let exists: bool = connection
        .query_row(sql, params![id as i64], |row| row.get(0))
        .db_context("Failed to check reference")?;
    if exists {
        Ok(())
    } else {
        Err(StoreError::missing(entity, id))
    }
}

fn timestamp_to_sql(timestamp: &Timestamp) -> i64 {
    timestamp.as_millisecond()
}

fn timestamp_from_row(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    let millis: i64 = row.get(index)?;
    Timestamp::from_millisecond(millis)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(e)))
}

fn id_from_row(row: &Row, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}
