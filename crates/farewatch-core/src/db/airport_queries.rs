//! Airport upserts and queries.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{begin_write, id_from_row};
use crate::{
    error::{DatabaseResultExt, Result},
    models::Airport,
};

const UPSERT_AIRPORT_SQL: &str = "INSERT INTO AIRPORT (airport_id, name, country, lat, long) VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (airport_id) DO UPDATE SET name = excluded.name, country = excluded.country, lat = excluded.lat, long = excluded.long";
const SELECT_AIRPORT_SQL: &str =
    "SELECT airport_id, name, country, lat, long FROM AIRPORT WHERE airport_id = ?1";
const SELECT_AIRPORTS_SQL: &str =
    "SELECT airport_id, name, country, lat, long FROM AIRPORT ORDER BY airport_id";

fn build_airport_from_row(row: &Row) -> rusqlite::Result<Airport> {
    Ok(Airport {
        id: id_from_row(row, 0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
    })
}

pub(super) fn write_airport(connection: &Connection, airport: &Airport) -> Result<()> {
    airport.validate()?;
    connection
        .execute(
            UPSERT_AIRPORT_SQL,
            params![
                airport.id as i64,
                airport.name,
                airport.country,
                airport.latitude,
                airport.longitude,
            ],
        )
        .db_context("Failed to upsert airport")?;

    debug!("Upserted airport {} ({})", airport.id, airport.name);
    Ok(())
}

impl super::Database {
    /// Inserts the airport, or replaces every field of the existing row with
    /// the same ID.
    pub fn upsert_airport(&mut self, airport: &Airport) -> Result<()> {
        let tx = begin_write(&mut self.connection)?;
        write_airport(&tx, airport)?;
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Retrieves an airport by its ID.
    pub fn get_airport(&self, id: u64) -> Result<Option<Airport>> {
        self.connection
            .query_row(SELECT_AIRPORT_SQL, params![id as i64], build_airport_from_row)
            .optional()
            .db_context("Failed to query airport")
    }

    /// Lists all airports ordered by ID.
    pub fn list_airports(&self) -> Result<Vec<Airport>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_AIRPORTS_SQL)
            .db_context("Failed to prepare query")?;
        let airports = stmt
            .query_map([], build_airport_from_row)
            .db_context("Failed to query airports")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read airport row")?;
        Ok(airports)
    }
}
