//! Route model definition.

use serde::{Deserialize, Serialize};

use super::validate_id;
use crate::error::{Result, StoreError};

/// A directed itinerary between two airports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    /// Caller-assigned unique identifier
    pub id: u64,

    pub start_airport_id: u64,

    pub end_airport_id: u64,

    /// Intermediate stops in travel order; empty for a direct route
    #[serde(default)]
    pub layovers: Vec<u64>,
}

impl Route {
    /// Creates a direct route.
    pub fn new(id: u64, start_airport_id: u64, end_airport_id: u64) -> Self {
        Self {
            id,
            start_airport_id,
            end_airport_id,
            layovers: Vec::new(),
        }
    }

    pub fn with_layovers(mut self, layovers: impl IntoIterator<Item = u64>) -> Self {
        self.layovers = layovers.into_iter().collect();
        self
    }

    pub fn is_direct(&self) -> bool {
        self.layovers.is_empty()
    }

    /// Every airport on the itinerary, start to end.
    pub fn stops(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(self.start_airport_id)
            .chain(self.layovers.iter().copied())
            .chain(std::iter::once(self.end_airport_id))
    }

    pub fn validate(&self) -> Result<()> {
        validate_id("id", self.id)?;
        validate_id("start_airport_id", self.start_airport_id)?;
        validate_id("end_airport_id", self.end_airport_id)?;
        if self.start_airport_id == self.end_airport_id {
            return Err(StoreError::validation("end_airport_id").with_reason(format!(
                "route {} starts and ends at airport {}",
                self.id, self.start_airport_id
            )));
        }
        for &stop in &self.layovers {
            validate_id("layovers", stop)?;
            if stop == self.start_airport_id || stop == self.end_airport_id {
                return Err(StoreError::validation("layovers")
                    .with_reason(format!("airport {stop} is already an endpoint of the route")));
            }
        }
        Ok(())
    }
}
