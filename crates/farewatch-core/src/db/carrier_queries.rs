//! Carrier upserts and queries.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{begin_write, id_from_row, require};
use crate::{
    error::{DatabaseResultExt, Entity, Result, StoreError},
    models::Carrier,
};

const UPSERT_CARRIER_SQL: &str = "INSERT INTO CARRIER (carrier_id, carrier_name, parent_carrier_id, country, flags) VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (carrier_id) DO UPDATE SET carrier_name = excluded.carrier_name, parent_carrier_id = excluded.parent_carrier_id, country = excluded.country, flags = excluded.flags";
const SELECT_CARRIER_SQL: &str = "SELECT carrier_id, carrier_name, parent_carrier_id, country, flags FROM CARRIER WHERE carrier_id = ?1";
const SELECT_CARRIERS_SQL: &str =
    "SELECT carrier_id, carrier_name, parent_carrier_id, country, flags FROM CARRIER ORDER BY carrier_id";
// UNION rather than UNION ALL so a pre-existing cycle cannot recurse forever.
const HAS_ANCESTOR_SQL: &str = "WITH RECURSIVE lineage(id) AS ( \
         SELECT ?1 \
         UNION \
         SELECT c.parent_carrier_id FROM CARRIER c JOIN lineage l ON c.carrier_id = l.id \
         WHERE c.parent_carrier_id IS NOT NULL \
     ) SELECT EXISTS(SELECT 1 FROM lineage WHERE id = ?2)";
const SELECT_ANCESTORS_SQL: &str = "WITH RECURSIVE lineage(id, depth) AS ( \
         SELECT parent_carrier_id, 1 FROM CARRIER WHERE carrier_id = ?1 AND parent_carrier_id IS NOT NULL \
         UNION \
         SELECT c.parent_carrier_id, l.depth + 1 FROM CARRIER c JOIN lineage l ON c.carrier_id = l.id \
         WHERE c.parent_carrier_id IS NOT NULL AND l.depth < 64 \
     ) \
     SELECT c.carrier_id, c.carrier_name, c.parent_carrier_id, c.country, c.flags \
     FROM lineage l JOIN CARRIER c ON c.carrier_id = l.id ORDER BY l.depth";

fn build_carrier_from_row(row: &Row) -> rusqlite::Result<Carrier> {
    Ok(Carrier {
        id: id_from_row(row, 0)?,
        name: row.get(1)?,
        parent_id: row.get::<_, Option<i64>>(2)?.map(|id| id as u64),
        country: row.get(3)?,
        flags: Carrier::parse_flags(row.get(4)?),
    })
}

/// Validates and writes one carrier inside the caller's transaction.
pub(super) fn write_carrier(connection: &Connection, carrier: &Carrier) -> Result<()> {
    carrier.validate()?;

    if let Some(parent_id) = carrier.parent_id {
        require(connection, Entity::Carrier, parent_id)?;

        let creates_cycle: bool = connection
            .query_row(
                HAS_ANCESTOR_SQL,
                params![parent_id as i64, carrier.id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check carrier ancestry")?;
        if creates_cycle {
            return Err(StoreError::validation("parent_id").with_reason(format!(
                "carrier {} is an ancestor of carrier {parent_id}",
                carrier.id
            )));
        }
    }

    connection
        .execute(
            UPSERT_CARRIER_SQL,
            params![
                carrier.id as i64,
                carrier.name,
                carrier.parent_id.map(|id| id as i64),
                carrier.country,
                carrier.flags_column(),
            ],
        )
        .db_context("Failed to upsert carrier")?;

    debug!("Upserted carrier {} ({})", carrier.id, carrier.name);
    Ok(())
}

impl super::Database {
    /// Inserts the carrier, or replaces every field of the existing row with
    /// the same ID. Writing identical data twice leaves one unchanged row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for malformed records or when the
    /// parent would make the carrier its own ancestor, and
    /// [`StoreError::Referential`] when the parent carrier does not exist.
    pub fn upsert_carrier(&mut self, carrier: &Carrier) -> Result<()> {
        let tx = begin_write(&mut self.connection)?;
        write_carrier(&tx, carrier)?;
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Retrieves a carrier by its ID.
    pub fn get_carrier(&self, id: u64) -> Result<Option<Carrier>> {
        self.connection
            .query_row(SELECT_CARRIER_SQL, params![id as i64], build_carrier_from_row)
            .optional()
            .db_context("Failed to query carrier")
    }

    /// Lists all carriers ordered by ID.
    pub fn list_carriers(&self) -> Result<Vec<Carrier>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CARRIERS_SQL)
            .db_context("Failed to prepare query")?;
        let carriers = stmt
            .query_map([], build_carrier_from_row)
            .db_context("Failed to query carriers")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read carrier row")?;
        Ok(carriers)
    }

    /// The chain of parent carriers, nearest first. Empty for a carrier with
    /// no parent.
    pub fn carrier_ancestors(&self, id: u64) -> Result<Vec<Carrier>> {
        require(&self.connection, Entity::Carrier, id)?;
        let mut stmt = self
            .connection
            .prepare(SELECT_ANCESTORS_SQL)
            .db_context("Failed to prepare query")?;
        let ancestors = stmt
            .query_map(params![id as i64], build_carrier_from_row)
            .db_context("Failed to query carrier ancestors")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read carrier row")?;
        Ok(ancestors)
    }
}
