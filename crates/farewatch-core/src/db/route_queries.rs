//! Route upserts and queries, including the ordered layover child rows.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{begin_write, id_from_row, require};
use crate::{
    error::{DatabaseResultExt, Entity, Result, StoreError},
    models::Route,
};

const UPSERT_ROUTE_SQL: &str = "INSERT INTO ROUTE (route_id, start_airport_id, end_airport_id) VALUES (?1, ?2, ?3) \
     ON CONFLICT (route_id) DO UPDATE SET start_airport_id = excluded.start_airport_id, end_airport_id = excluded.end_airport_id";
const DELETE_LAYOVERS_SQL: &str = "DELETE FROM ROUTE_LAYOVER WHERE route_id = ?1";
const INSERT_LAYOVER_SQL: &str =
    "INSERT INTO ROUTE_LAYOVER (route_id, sequence_index, airport_id) VALUES (?1, ?2, ?3)";
const SELECT_LAYOVERS_SQL: &str =
    "SELECT airport_id FROM ROUTE_LAYOVER WHERE route_id = ?1 ORDER BY sequence_index";
const HAS_DIRECT_QUOTES_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM QUOTE WHERE route_id = ?1 AND direct_flag = 1)";
const COUNT_LAYOVERS_SQL: &str = "SELECT COUNT(*) FROM ROUTE_LAYOVER WHERE route_id = ?1";
const SELECT_ROUTE_SQL: &str =
    "SELECT route_id, start_airport_id, end_airport_id FROM ROUTE WHERE route_id = ?1";
const SELECT_ROUTES_SQL: &str =
    "SELECT route_id, start_airport_id, end_airport_id FROM ROUTE ORDER BY route_id";
const SELECT_ROUTES_BETWEEN_SQL: &str = "SELECT route_id, start_airport_id, end_airport_id FROM ROUTE \
     WHERE start_airport_id = ?1 AND end_airport_id = ?2 ORDER BY route_id";

/// Builds a route without its layovers; callers fill those in.
fn build_route_from_row(row: &Row) -> rusqlite::Result<Route> {
    Ok(Route {
        id: id_from_row(row, 0)?,
        start_airport_id: id_from_row(row, 1)?,
        end_airport_id: id_from_row(row, 2)?,
        layovers: Vec::new(),
    })
}

/// Validates and writes one route and its layovers inside the caller's
/// transaction. Existing layover rows are replaced wholesale.
pub(super) fn write_route(connection: &Connection, route: &Route) -> Result<()> {
    route.validate()?;
    for airport_id in route.stops() {
        require(connection, Entity::Airport, airport_id)?;
    }

    // Stored direct quotes pin the route to having no layovers.
    if !route.layovers.is_empty() {
        let has_direct_quotes: bool = connection
            .query_row(HAS_DIRECT_QUOTES_SQL, params![route.id as i64], |row| row.get(0))
            .db_context("Failed to check direct quotes")?;
        if has_direct_quotes {
            return Err(StoreError::validation("layovers").with_reason(format!(
                "route {} already has direct quotes, so it cannot gain layovers",
                route.id
            )));
        }
    }

    connection
        .execute(
            UPSERT_ROUTE_SQL,
            params![
                route.id as i64,
                route.start_airport_id as i64,
                route.end_airport_id as i64
            ],
        )
        .db_context("Failed to upsert route")?;

    connection
        .execute(DELETE_LAYOVERS_SQL, params![route.id as i64])
        .db_context("Failed to clear route layovers")?;

    let mut insert = connection
        .prepare_cached(INSERT_LAYOVER_SQL)
        .db_context("Failed to prepare layover insert")?;
    for (index, airport_id) in route.layovers.iter().enumerate() {
        insert
            .execute(params![route.id as i64, index as i64, *airport_id as i64])
            .db_context("Failed to insert route layover")?;
    }

    debug!(
        "Upserted route {} ({} -> {}, {} layovers)",
        route.id,
        route.start_airport_id,
        route.end_airport_id,
        route.layovers.len()
    );
    Ok(())
}

/// Number of layovers stored for a route.
pub(super) fn layover_count(connection: &Connection, route_id: u64) -> Result<usize> {
    let count: i64 = connection
        .query_row(COUNT_LAYOVERS_SQL, params![route_id as i64], |row| row.get(0))
        .db_context("Failed to count route layovers")?;
    Ok(count as usize)
}

impl super::Database {
    /// Inserts or updates the route and replaces its layovers so that the
    /// stored sequence matches `route.layovers` exactly, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Referential`] when an endpoint or layover
    /// airport does not exist, and [`StoreError::Validation`] for malformed
    /// routes or for adding layovers to a route that already has direct
    /// quotes.
    pub fn upsert_route(&mut self, route: &Route) -> Result<()> {
        let tx = begin_write(&mut self.connection)?;
        write_route(&tx, route)?;
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Retrieves a route and its layovers by ID.
    pub fn get_route(&self, id: u64) -> Result<Option<Route>> {
        let mut route = self
            .connection
            .query_row(SELECT_ROUTE_SQL, params![id as i64], build_route_from_row)
            .optional()
            .db_context("Failed to query route")?;

        if let Some(ref mut route) = route {
            route.layovers = self.get_layovers(route.id)?;
        }

        Ok(route)
    }

    /// Layover airport IDs of a route in travel order.
    pub fn get_layovers(&self, route_id: u64) -> Result<Vec<u64>> {
        let mut stmt = self
            .connection
            .prepare_cached(SELECT_LAYOVERS_SQL)
            .db_context("Failed to prepare query")?;
        let layovers = stmt
            .query_map(params![route_id as i64], |row| id_from_row(row, 0))
            .db_context("Failed to query route layovers")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read layover row")?;
        Ok(layovers)
    }

    /// Lists all routes with their layovers, ordered by ID.
    pub fn list_routes(&self) -> Result<Vec<Route>> {
        self.routes_for(SELECT_ROUTES_SQL, &[])
    }

    /// Routes from `start` to `end`, whatever their layovers.
    pub fn routes_between(&self, start_airport_id: u64, end_airport_id: u64) -> Result<Vec<Route>> {
        self.routes_for(
            SELECT_ROUTES_BETWEEN_SQL,
            &[start_airport_id as i64, end_airport_id as i64],
        )
    }

    fn routes_for(&self, sql: &str, args: &[i64]) -> Result<Vec<Route>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;
        let mut routes = stmt
            .query_map(rusqlite::params_from_iter(args), build_route_from_row)
            .db_context("Failed to query routes")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read route row")?;

        for route in &mut routes {
            route.layovers = self.get_layovers(route.id)?;
        }

        Ok(routes)
    }
}
