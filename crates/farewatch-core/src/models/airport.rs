//! Airport model definition.

use serde::{Deserialize, Serialize};

use super::{validate_id, validate_text};
use crate::error::{Result, StoreError};

/// An airport that routes start at, end at, or stop over in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Airport {
    /// Caller-assigned unique identifier
    pub id: u64,

    /// Name or code, e.g. `LHR`
    pub name: String,

    #[serde(default)]
    pub country: Option<String>,

    /// Geo tag, kept for catchment analysis
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Airport {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_id("id", self.id)?;
        validate_text("name", &self.name)?;
        if let Some(country) = &self.country {
            validate_text("country", country)?;
        }
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(long)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(StoreError::validation("latitude")
                        .with_reason(format!("{lat} is outside [-90, 90]")));
                }
                if !(-180.0..=180.0).contains(&long) {
                    return Err(StoreError::validation("longitude")
                        .with_reason(format!("{long} is outside [-180, 180]")));
                }
                Ok(())
            }
            _ => Err(StoreError::validation("latitude")
                .with_reason("latitude and longitude must be given together")),
        }
    }
}
