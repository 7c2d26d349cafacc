//! Quote model definitions.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::{validate_currency, validate_id, validate_text};
use crate::error::{Result, StoreError};

/// A price observation as submitted by a sourcing process, before the store
/// assigns it an identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewQuote {
    pub route_id: u64,

    pub carrier_id: u64,

    pub departure_time: Timestamp,

    pub landing_time: Timestamp,

    pub price: f64,

    /// Currency tag; the configured default applies when absent
    #[serde(default)]
    pub currency: Option<String>,

    pub direct: bool,

    /// Total time spent on layovers, only meaningful for indirect flights
    #[serde(default)]
    pub layover_minutes: Option<u32>,

    /// When the price was observed
    pub quote_time: Timestamp,

    /// Which scraper or provider produced the observation
    pub sourcing: String,
}

impl NewQuote {
    /// Checks the record on its own. Whether the route's layovers agree with
    /// the direct flag is checked on write.
    pub fn validate(&self) -> Result<()> {
        validate_id("route_id", self.route_id)?;
        validate_id("carrier_id", self.carrier_id)?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(StoreError::validation("price")
                .with_reason(format!("{} is not a positive amount", self.price)));
        }
        if let Some(currency) = &self.currency {
            validate_currency("currency", currency)?;
        }
        // Stored at millisecond precision.
        if self.landing_time.as_millisecond() <= self.departure_time.as_millisecond() {
            return Err(StoreError::validation("landing_time")
                .with_reason("landing must be after departure"));
        }
        if self.direct && self.layover_minutes.is_some() {
            return Err(StoreError::validation("layover_minutes")
                .with_reason("a direct flight has no layover"));
        }
        validate_text("sourcing", &self.sourcing)?;
        Ok(())
    }
}

/// A stored, immutable price observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Store-assigned identifier, increasing in insertion order
    pub id: u64,

    pub route_id: u64,

    pub carrier_id: u64,

    pub departure_time: Timestamp,

    pub landing_time: Timestamp,

    pub price: f64,

    pub currency: String,

    pub direct: bool,

    pub layover_minutes: Option<u32>,

    pub quote_time: Timestamp,

    pub sourcing: String,
}

impl Quote {
    /// Gate-to-gate flight time.
    pub fn duration(&self) -> SignedDuration {
        self.landing_time.duration_since(self.departure_time)
    }
}
