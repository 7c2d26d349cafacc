//! Database schema initialization and compatibility checks.

use log::info;

use crate::{
    config::SCHEMA_VERSION,
    error::{DatabaseResultExt, Result, StoreError},
};

const SELECT_USER_VERSION_SQL: &str = "PRAGMA user_version";
const SELECT_COLUMNS_SQL: &str = "SELECT name FROM pragma_table_info(?1)";
const SELECT_TABLES_SQL: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

/// Columns each table must have for the queries in this module tree to work.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "CARRIER",
        &["carrier_id", "carrier_name", "parent_carrier_id", "country", "flags"],
    ),
    ("AIRPORT", &["airport_id", "name", "country", "lat", "long"]),
    ("ROUTE", &["route_id", "start_airport_id", "end_airport_id"]),
    ("ROUTE_LAYOVER", &["route_id", "sequence_index", "airport_id"]),
    (
        "QUOTE",
        &[
            "quote_id",
            "route_id",
            "carrier_id",
            "departure_time",
            "landing_time",
            "price",
            "currency",
            "direct_flag",
            "layover_minutes",
            "quote_time",
            "sourcing",
        ],
    ),
];

impl super::Database {
    /// Creates any missing tables and checks that existing ones are usable.
    ///
    /// Safe to call on every connection. A fresh store is stamped with the
    /// current schema version.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Schema`] when the stored schema version differs
    /// from the configured one or an existing table is missing a column.
    pub fn ensure_schema(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(StoreError::Schema {
                table: "user_version".to_string(),
                reason: format!(
                    "configured for version {}, but this build only knows version {SCHEMA_VERSION}",
                    self.schema_version
                ),
            });
        }

        let stored_version = self.stored_schema_version()?;
        if stored_version != 0 && stored_version != self.schema_version {
            return Err(StoreError::Schema {
                table: "user_version".to_string(),
                reason: format!(
                    "store is at version {stored_version}, expected {}",
                    self.schema_version
                ),
            });
        }

        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        tx.execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        for (table, columns) in REQUIRED_COLUMNS {
            let present = self.table_columns(table)?;
            if let Some(missing) = columns.iter().find(|c| !present.iter().any(|p| p == *c)) {
                return Err(StoreError::Schema {
                    table: (*table).to_string(),
                    reason: format!("missing column '{missing}'"),
                });
            }
        }

        if stored_version == 0 {
            tx.execute_batch(&format!("PRAGMA user_version = {}", self.schema_version))
                .db_context("Failed to record schema version")?;
            info!("Initialized fare store schema version {}", self.schema_version);
        }

        tx.commit().db_context("Failed to commit schema")?;
        Ok(())
    }

    /// Names of the tables present in the store, sorted. SQLite's internal
    /// tables are left out.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TABLES_SQL)
            .db_context("Failed to prepare query")?;
        let tables = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to list tables")?
            .collect::<rusqlite::Result<Vec<String>>>()
            .db_context("Failed to read table name")?;
        Ok(tables)
    }

    /// The `user_version` stamp, 0 for a store never initialized.
    pub fn stored_schema_version(&self) -> Result<u32> {
        let version: i64 = self
            .connection
            .query_row(SELECT_USER_VERSION_SQL, [], |row| row.get(0))
            .db_context("Failed to read schema version")?;
        Ok(version as u32)
    }

    fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_COLUMNS_SQL)
            .db_context("Failed to prepare query")?;
        let columns = stmt
            .query_map([table], |row| row.get(0))
            .db_context("Failed to inspect table")?
            .collect::<rusqlite::Result<Vec<String>>>()
            .db_context("Failed to read column name")?;
        Ok(columns)
    }
}
