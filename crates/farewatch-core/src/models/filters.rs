//! Filter types for querying quotes.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Ordering of query results by quote time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest observation first
    #[default]
    Ascending,

    /// Newest observation first
    Descending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Filter options for querying quotes. All predicates are optional and
/// combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteFilter {
    pub route_id: Option<u64>,

    pub carrier_id: Option<u64>,

    /// Inclusive lower bound on quote time
    pub quoted_after: Option<Timestamp>,

    /// Inclusive upper bound on quote time
    pub quoted_before: Option<Timestamp>,

    /// Only quotes produced by this source
    pub sourcing: Option<String>,

    /// Only direct (`true`) or only indirect (`false`) quotes
    pub direct: Option<bool>,

    #[serde(default)]
    pub order: SortOrder,

    pub limit: Option<u32>,
}

impl QuoteFilter {
    /// All quotes for one route, oldest first.
    pub fn for_route(route_id: u64) -> Self {
        Self {
            route_id: Some(route_id),
            ..Default::default()
        }
    }

    /// Quotes observed within `[from, to]`.
    pub fn between(from: Timestamp, to: Timestamp) -> Self {
        Self {
            quoted_after: Some(from),
            quoted_before: Some(to),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.quoted_after, self.quoted_before) {
            if from > to {
                return Err(StoreError::validation("quoted_after")
                    .with_reason(format!("range start {from} is after range end {to}")));
            }
        }
        Ok(())
    }
}
