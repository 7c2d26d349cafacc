//! Batched writes in dependency order.

use serde::{Deserialize, Serialize};

use super::{Airport, Carrier, NewQuote, Route};

/// Everything one scrape produced. Written carriers and airports first, then
/// routes, then quotes, all in a single transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FareBatch {
    #[serde(default)]
    pub carriers: Vec<Carrier>,

    #[serde(default)]
    pub airports: Vec<Airport>,

    #[serde(default)]
    pub routes: Vec<Route>,

    #[serde(default)]
    pub quotes: Vec<NewQuote>,
}

impl FareBatch {
    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
            && self.airports.is_empty()
            && self.routes.is_empty()
            && self.quotes.is_empty()
    }
}

/// Row counts written by a batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub carriers: usize,
    pub airports: usize,
    pub routes: usize,
    pub quotes: usize,
}
