//! Carrier model definition.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{validate_id, validate_text};
use crate::error::{Result, StoreError};

/// An airline or operator, possibly a subsidiary of another carrier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Carrier {
    /// Caller-assigned unique identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Parent carrier when this one is a subsidiary
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Country of registration
    #[serde(default)]
    pub country: Option<String>,

    /// Free-form tags such as `low-cost` or `alliance:oneworld`
    #[serde(default)]
    pub flags: BTreeSet<String>,
}

impl Carrier {
    /// Creates a carrier with no parent, country or flags.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            country: None,
            flags: BTreeSet::new(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    /// Checks the fields that do not need the store. A carrier naming itself
    /// as parent is caught here; longer cycles are caught on write.
    pub fn validate(&self) -> Result<()> {
        validate_id("id", self.id)?;
        validate_text("name", &self.name)?;
        if let Some(country) = &self.country {
            validate_text("country", country)?;
        }
        if let Some(parent_id) = self.parent_id {
            validate_id("parent_id", parent_id)?;
            if parent_id == self.id {
                return Err(StoreError::validation("parent_id")
                    .with_reason(format!("carrier {} cannot be its own parent", self.id)));
            }
        }
        for flag in &self.flags {
            if flag.trim().is_empty() || flag.contains(',') {
                return Err(StoreError::validation("flags")
                    .with_reason(format!("'{flag}' is not a valid flag")));
            }
        }
        Ok(())
    }

    /// Flags in their stored form: comma-separated, or `None` when empty.
    pub(crate) fn flags_column(&self) -> Option<String> {
        if self.flags.is_empty() {
            None
        } else {
            Some(self.flags.iter().map(String::as_str).collect::<Vec<_>>().join(","))
        }
    }

    pub(crate) fn parse_flags(column: Option<String>) -> BTreeSet<String> {
        column
            .map(|s| s.split(',').filter(|f| !f.is_empty()).map(String::from).collect())
            .unwrap_or_default()
    }
}
