//! Display implementations for domain models.
//!
//! Every record renders as a small markdown block: a header with its ID
//! followed by a bullet list of the fields that are set.

use std::fmt;

use super::datetime::{FlightDuration, LocalDateTime};
use crate::models::{Airport, BatchSummary, Carrier, Quote, Route, SortOrder};

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}. {}", self.id, self.name)?;
        writeln!(f)?;
        if let Some(country) = &self.country {
            writeln!(f, "- Country: {country}")?;
        }
        if let Some(parent_id) = self.parent_id {
            writeln!(f, "- Parent carrier: {parent_id}")?;
        }
        if !self.flags.is_empty() {
            let flags: Vec<&str> = self.flags.iter().map(String::as_str).collect();
            writeln!(f, "- Flags: {}", flags.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}. {}", self.id, self.name)?;
        writeln!(f)?;
        if let Some(country) = &self.country {
            writeln!(f, "- Country: {country}")?;
        }
        if let (Some(lat), Some(long)) = (self.latitude, self.longitude) {
            writeln!(f, "- Location: {lat:.4}, {long:.4}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stops: Vec<String> = self.stops().map(|id| id.to_string()).collect();
        writeln!(f, "## Route {}: {}", self.id, stops.join(" → "))?;
        writeln!(f)?;
        if self.is_direct() {
            writeln!(f, "- Direct")?;
        } else {
            writeln!(f, "- Layovers: {}", self.layovers.len())?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Quote {}: {:.2} {}", self.id, self.price, self.currency)?;
        writeln!(f)?;
        writeln!(f, "- Route: {}", self.route_id)?;
        writeln!(f, "- Carrier: {}", self.carrier_id)?;
        writeln!(f, "- Departs: {}", LocalDateTime(&self.departure_time))?;
        writeln!(f, "- Lands: {}", LocalDateTime(&self.landing_time))?;
        writeln!(f, "- Duration: {}", FlightDuration(self.duration()))?;
        if self.direct {
            writeln!(f, "- Direct")?;
        } else if let Some(minutes) = self.layover_minutes {
            writeln!(f, "- Layover: {minutes} min")?;
        } else {
            writeln!(f, "- Indirect")?;
        }
        writeln!(f, "- Quoted: {}", LocalDateTime(&self.quote_time))?;
        writeln!(f, "- Source: {}", self.sourcing)?;
        writeln!(f)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} carriers, {} airports, {} routes and {} quotes.",
            self.carriers, self.airports, self.routes, self.quotes
        )
    }
}
