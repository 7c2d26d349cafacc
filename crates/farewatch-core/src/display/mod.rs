//! Display formatting for records and collections.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers in [`collections`] format groups of them, and
//! [`OperationStatus`] confirms writes that return nothing to show. All
//! output is markdown so the CLI can render it richly or print it as is.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Carriers, Airports, Routes,
//!   Quotes, Tables)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Timestamp and duration formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{Airports, Carriers, Quotes, Routes, Tables};
pub use datetime::{FlightDuration, LocalDateTime};
pub use status::OperationStatus;
