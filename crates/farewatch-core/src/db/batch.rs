//! Batched writes following the store's dependency order.

use log::info;

use super::{
    airport_queries::write_airport, begin_write, carrier_queries::write_carrier,
    quote_queries::write_quote, route_queries::write_route,
};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{BatchSummary, FareBatch},
};

impl super::Database {
    /// Writes a whole batch in one transaction: carriers, then airports, then
    /// routes, then quotes, each list in the order given. Any failure rolls
    /// the entire batch back.
    ///
    /// Carriers are written in list order, so a parent must precede its
    /// subsidiaries in `batch.carriers` unless it is already stored.
    pub fn write_batch(&mut self, batch: &FareBatch) -> Result<BatchSummary> {
        let tx = begin_write(&mut self.connection)?;

        for carrier in &batch.carriers {
            write_carrier(&tx, carrier)?;
        }
        for airport in &batch.airports {
            write_airport(&tx, airport)?;
        }
        for route in &batch.routes {
            write_route(&tx, route)?;
        }
        for quote in &batch.quotes {
            write_quote(&tx, quote, &self.currency_default)?;
        }

        tx.commit().db_context("Failed to commit batch")?;

        let summary = BatchSummary {
            carriers: batch.carriers.len(),
            airports: batch.airports.len(),
            routes: batch.routes.len(),
            quotes: batch.quotes.len(),
        };
        info!(
            "Wrote batch: {} carriers, {} airports, {} routes, {} quotes",
            summary.carriers, summary.airports, summary.routes, summary.quotes
        );
        Ok(summary)
    }
}
