//! Core library for the Farewatch flight-fare tracker.
//!
//! This crate is the persistence layer for fare data: carriers, airports,
//! routes with ordered layovers, and append-only price quotes observed over
//! time, kept in a single SQLite file.
//!
//! Writes follow the foreign keys. Carriers and airports come first, then
//! routes, then quotes; the store checks every reference and rejects a write
//! whose target is missing rather than reordering anything.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use farewatch_core::{Airport, Carrier, FareStoreBuilder, NewQuote, QuoteFilter, Route};
//! use jiff::Timestamp;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FareStoreBuilder::new()
//!     .with_database_path(Some("fares.db"))
//!     .build()?;
//!
//! let mut db = store.open()?;
//! db.upsert_carrier(&Carrier::new(2, "Virgin Airways").with_country("UK"))?;
//! db.upsert_airport(&Airport::new(10, "LHR"))?;
//! db.upsert_airport(&Airport::new(20, "JFK"))?;
//! db.upsert_route(&Route::new(100, 10, 20))?;
//!
//! let departure: Timestamp = "2025-03-01T09:00:00Z".parse()?;
//! db.insert_quote(&NewQuote {
//!     route_id: 100,
//!     carrier_id: 2,
//!     departure_time: departure,
//!     landing_time: "2025-03-01T16:30:00Z".parse()?,
//!     price: 450.0,
//!     currency: None,
//!     direct: true,
//!     layover_minutes: None,
//!     quote_time: Timestamp::now(),
//!     sourcing: "skyscanner".to_string(),
//! })?;
//!
//! for quote in db.query_quotes(&QuoteFilter::for_route(100))?.iter()? {
//!     println!("{}", quote?);
//! }
//! db.close()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::{StoreConfig, DEFAULT_CURRENCY, SCHEMA_VERSION};
pub use db::{Database, QuoteQuery};
pub use error::{Entity, Result, StoreError};
pub use models::{
    Airport, BatchSummary, Carrier, FareBatch, NewQuote, Quote, QuoteColumns, QuoteFilter, Route,
    SortOrder,
};
pub use store::{FareStore, FareStoreBuilder};
