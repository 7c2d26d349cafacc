//! Quote inserts and filtered queries.

use log::debug;
use rusqlite::{
    params, params_from_iter, types::Value, Connection, OptionalExtension, Row, Statement,
};

use super::{begin_write, id_from_row, require, route_queries::layover_count, timestamp_from_row, timestamp_to_sql};
use crate::{
    error::{DatabaseResultExt, Entity, Result, StoreError},
    models::{NewQuote, Quote, QuoteColumns, QuoteFilter},
};

const INSERT_QUOTE_SQL: &str = "INSERT INTO QUOTE (route_id, carrier_id, departure_time, landing_time, price, currency, direct_flag, layover_minutes, quote_time, sourcing) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const QUOTE_COLUMNS: &str = "quote_id, route_id, carrier_id, departure_time, landing_time, price, currency, direct_flag, layover_minutes, quote_time, sourcing";

fn build_quote_from_row(row: &Row) -> rusqlite::Result<Quote> {
    Ok(Quote {
        id: id_from_row(row, 0)?,
        route_id: id_from_row(row, 1)?,
        carrier_id: id_from_row(row, 2)?,
        departure_time: timestamp_from_row(row, 3)?,
        landing_time: timestamp_from_row(row, 4)?,
        price: row.get(5)?,
        currency: row.get(6)?,
        direct: row.get(7)?,
        layover_minutes: row.get(8)?,
        quote_time: timestamp_from_row(row, 9)?,
        sourcing: row.get(10)?,
    })
}

fn select_quote(connection: &Connection, id: u64) -> Result<Option<Quote>> {
    connection
        .query_row(
            &format!("SELECT {QUOTE_COLUMNS} FROM QUOTE WHERE quote_id = ?1"),
            params![id as i64],
            build_quote_from_row,
        )
        .optional()
        .db_context("Failed to query quote")
}

/// Validates and appends one quote inside the caller's transaction, returning
/// the row as stored.
pub(super) fn write_quote(
    connection: &Connection,
    quote: &NewQuote,
    currency_default: &str,
) -> Result<Quote> {
    quote.validate()?;
    require(connection, Entity::Route, quote.route_id)?;
    require(connection, Entity::Carrier, quote.carrier_id)?;

    if quote.direct {
        let layovers = layover_count(connection, quote.route_id)?;
        if layovers > 0 {
            return Err(StoreError::validation("direct").with_reason(format!(
                "route {} has {layovers} layover(s), so a quote on it cannot be direct",
                quote.route_id
            )));
        }
    }

    let currency = quote.currency.as_deref().unwrap_or(currency_default);

    connection
        .execute(
            INSERT_QUOTE_SQL,
            params![
                quote.route_id as i64,
                quote.carrier_id as i64,
                timestamp_to_sql(&quote.departure_time),
                timestamp_to_sql(&quote.landing_time),
                quote.price,
                currency,
                quote.direct,
                quote.layover_minutes,
                timestamp_to_sql(&quote.quote_time),
                quote.sourcing,
            ],
        )
        .db_context("Failed to insert quote")?;

    let id = connection.last_insert_rowid() as u64;
    debug!(
        "Inserted quote {id} for route {} / carrier {}: {} {currency}",
        quote.route_id, quote.carrier_id, quote.price
    );

    select_quote(connection, id)?.ok_or_else(|| {
        StoreError::database("Inserted quote vanished").with_source(rusqlite::Error::QueryReturnedNoRows)
    })
}

/// A prepared quote query. Each call to [`QuoteQuery::iter`] runs the query
/// again from the start, so results reflect the store at that moment.
pub struct QuoteQuery<'db> {
    statement: Statement<'db>,
    params: Vec<Value>,
}

impl QuoteQuery<'_> {
    /// Executes the query and yields quotes lazily, one row at a time.
    pub fn iter(&mut self) -> Result<impl Iterator<Item = Result<Quote>> + '_> {
        let rows = self
            .statement
            .query_map(params_from_iter(self.params.iter()), build_quote_from_row)
            .db_context("Failed to execute quote query")?;
        Ok(rows.map(|row| row.db_context("Failed to read quote row")))
    }

    /// Executes the query and collects every matching quote.
    pub fn fetch_all(&mut self) -> Result<Vec<Quote>> {
        self.iter()?.collect()
    }

    /// Executes the query and collects the results column by column.
    pub fn columns(&mut self) -> Result<QuoteColumns> {
        self.iter()?.collect()
    }
}

impl super::Database {
    /// Appends a quote and returns it with its assigned ID. Quotes are never
    /// updated; a newer observation is a new row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for malformed quotes, including a
    /// direct quote with a layover duration or on a route with layovers, and
    /// [`StoreError::Referential`] when the route or carrier does not exist.
    /// Nothing is written on failure.
    pub fn insert_quote(&mut self, quote: &NewQuote) -> Result<Quote> {
        let tx = begin_write(&mut self.connection)?;
        let stored = write_quote(&tx, quote, &self.currency_default)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(stored)
    }

    /// Retrieves a quote by its ID.
    pub fn get_quote(&self, id: u64) -> Result<Option<Quote>> {
        select_quote(&self.connection, id)
    }

    /// Prepares a query for quotes matching `filter`, ordered by quote time
    /// (then ID) ascending unless the filter asks for descending order.
    pub fn query_quotes(&self, filter: &QuoteFilter) -> Result<QuoteQuery<'_>> {
        filter.validate()?;

        let mut query = format!("SELECT {QUOTE_COLUMNS} FROM QUOTE");
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(route_id) = filter.route_id {
            conditions.push("route_id = ?");
            params.push(Value::Integer(route_id as i64));
        }

        if let Some(carrier_id) = filter.carrier_id {
            conditions.push("carrier_id = ?");
            params.push(Value::Integer(carrier_id as i64));
        }

        if let Some(after) = &filter.quoted_after {
            conditions.push("quote_time >= ?");
            params.push(Value::Integer(timestamp_to_sql(after)));
        }

        if let Some(before) = &filter.quoted_before {
            conditions.push("quote_time <= ?");
            params.push(Value::Integer(timestamp_to_sql(before)));
        }

        if let Some(sourcing) = &filter.sourcing {
            conditions.push("sourcing = ?");
            params.push(Value::Text(sourcing.clone()));
        }

        if let Some(direct) = filter.direct {
            conditions.push("direct_flag = ?");
            params.push(Value::Integer(i64::from(direct)));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        let order = filter.order.as_sql();
        query.push_str(&format!(" ORDER BY quote_time {order}, quote_id {order}"));

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Value::Integer(i64::from(limit)));
        }

        let statement = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        Ok(QuoteQuery { statement, params })
    }
}
