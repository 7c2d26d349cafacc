//! Column-oriented view of quote query results.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Quote;

/// Quotes laid out one vector per column, all of equal length, for
/// collaborators that work on whole series rather than records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteColumns {
    pub id: Vec<u64>,
    pub route_id: Vec<u64>,
    pub carrier_id: Vec<u64>,
    pub departure_time: Vec<Timestamp>,
    pub landing_time: Vec<Timestamp>,
    pub price: Vec<f64>,
    pub currency: Vec<String>,
    pub direct: Vec<bool>,
    pub layover_minutes: Vec<Option<u32>>,
    pub quote_time: Vec<Timestamp>,
    pub sourcing: Vec<String>,
}

impl QuoteColumns {
    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn push(&mut self, quote: Quote) {
        self.id.push(quote.id);
        self.route_id.push(quote.route_id);
        self.carrier_id.push(quote.carrier_id);
        self.departure_time.push(quote.departure_time);
        self.landing_time.push(quote.landing_time);
        self.price.push(quote.price);
        self.currency.push(quote.currency);
        self.direct.push(quote.direct);
        self.layover_minutes.push(quote.layover_minutes);
        self.quote_time.push(quote.quote_time);
        self.sourcing.push(quote.sourcing);
    }

    /// Lowest price in the series, if any.
    pub fn min_price(&self) -> Option<f64> {
        self.price.iter().copied().reduce(f64::min)
    }
}

impl FromIterator<Quote> for QuoteColumns {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let mut columns = Self::default();
        for quote in iter {
            columns.push(quote);
        }
        columns
    }
}

impl Extend<Quote> for QuoteColumns {
    fn extend<I: IntoIterator<Item = Quote>>(&mut self, iter: I) {
        for quote in iter {
            self.push(quote);
        }
    }
}
