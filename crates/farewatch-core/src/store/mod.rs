//! High-level handle for working with the fare store.
//!
//! [`FareStore`] holds the resolved configuration and hands out a fresh
//! [`Database`] connection per unit of work, so no connection outlives the
//! operation it was opened for.
//!
//! ```rust,no_run
//! use farewatch_core::{Airport, Carrier, FareStoreBuilder, Route};
//!
//! # fn example() -> farewatch_core::Result<()> {
//! let store = FareStoreBuilder::new()
//!     .with_database_path(Some("fares.db"))
//!     .build()?;
//!
//! store.with_database(|db| {
//!     db.upsert_carrier(&Carrier::new(2, "Virgin Airways").with_country("UK"))?;
//!     db.upsert_airport(&Airport::new(10, "LHR"))?;
//!     db.upsert_airport(&Airport::new(20, "JFK"))?;
//!     db.upsert_route(&Route::new(100, 10, 20))
//! })?;
//! # Ok(())
//! # }
//! ```

use std::thread;

use log::warn;

use crate::{config::StoreConfig, db::Database, error::Result};

pub mod builder;

pub use builder::FareStoreBuilder;

/// Configured access point to the fare store.
#[derive(Debug, Clone)]
pub struct FareStore {
    pub(crate) config: StoreConfig,
}

impl FareStore {
    pub(crate) fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens a connection with the schema ensured.
    pub fn open(&self) -> Result<Database> {
        let db = Database::connect(&self.config)?;
        db.ensure_schema()?;
        Ok(db)
    }

    /// Runs `operation` on a fresh connection and closes it afterwards.
    ///
    /// A [`StoreError::Busy`](crate::StoreError::Busy) failure is retried on
    /// a new connection up to `busy_retries` times, waiting
    /// `retry_backoff_ms` before the first retry and doubling each time. Any
    /// transaction the failed attempt had open is rolled back when its
    /// connection drops.
    ///
    /// An attempt that changed rows before failing is not retried, since an
    /// earlier transaction in `operation` may already have committed and
    /// running it again would apply those writes twice.
    pub fn with_database<T, F>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(&mut Database) -> Result<T>,
    {
        let mut attempt = 0;
        loop {
            let error = match self.open() {
                Ok(mut db) => {
                    let baseline = db.total_changes();
                    match operation(&mut db) {
                        Ok(value) => {
                            db.close()?;
                            return Ok(value);
                        }
                        Err(e) if db.total_changes() != baseline => {
                            if e.is_retryable() {
                                warn!("Fare store busy ({e}) after rows were written; not retrying");
                            }
                            return Err(e);
                        }
                        Err(e) => e,
                    }
                }
                Err(e) => e,
            };

            if !error.is_retryable() || attempt >= self.config.busy_retries {
                return Err(error);
            }
            let delay = self.config.retry_backoff(attempt);
            warn!(
                "Fare store busy ({error}); retrying in {}ms (attempt {} of {})",
                delay.as_millis(),
                attempt + 1,
                self.config.busy_retries
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}
