//! Data models for carriers, airports, routes and fare quotes.
//!
//! Every record type validates itself before it reaches SQLite, so a
//! malformed record is rejected with [`StoreError::Validation`] before any
//! row is touched. Checks that need the store (referenced rows, carrier
//! ancestry, a route's layovers) live in [`crate::db`].
//!
//! Display implementations live in [`crate::display`].

pub mod airport;
pub mod batch;
pub mod carrier;
pub mod columns;
pub mod filters;
pub mod quote;
pub mod route;


pub use airport::Airport;
pub use batch::{BatchSummary, FareBatch};
pub use carrier::Carrier;
pub use columns::QuoteColumns;
pub use filters::{QuoteFilter, SortOrder};
pub use quote::{NewQuote, Quote};
pub use route::Route;

use crate::error::{Result, StoreError};

/// Rejects identifiers SQLite cannot hold in a signed 64-bit column.
pub(crate) fn validate_id(field: &str, id: u64) -> Result<()> {
    if id > i64::MAX as u64 {
        return Err(StoreError::validation(field).with_reason(format!("{id} is out of range")));
    }
    Ok(())
}

/// Rejects empty or whitespace-only text.
pub(crate) fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(field).with_reason("must not be blank"));
    }
    Ok(())
}

/// Currency tags are three uppercase ASCII letters, e.g. `GBP`.
pub fn validate_currency(field: &str, code: &str) -> Result<()> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(StoreError::validation(field)
            .with_reason(format!("'{code}' is not a three-letter currency code")));
    }
    Ok(())
}
