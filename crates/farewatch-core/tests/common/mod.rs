#![allow(dead_code)]

use farewatch_core::{Airport, Carrier, Database, NewQuote, Route, StoreConfig};
use jiff::Timestamp;
use tempfile::TempDir;

/// Helper function to create a temporary database with the schema in place
pub fn create_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StoreConfig::new(temp_dir.path().join("fares.db"));
    let db = Database::connect(&config).expect("Failed to connect to test database");
    db.ensure_schema().expect("Failed to create schema");
    (temp_dir, db)
}

/// Seeds the carrier, airports and direct route used by most quote tests:
/// Virgin Airways (2) flying LHR (10) to JFK (20) on route 100.
pub fn seed_direct_route(db: &mut Database) {
    db.upsert_carrier(&Carrier::new(2, "Virgin Airways").with_country("UK"))
        .expect("Failed to upsert carrier");
    db.upsert_airport(&Airport::new(10, "LHR"))
        .expect("Failed to upsert LHR");
    db.upsert_airport(&Airport::new(20, "JFK"))
        .expect("Failed to upsert JFK");
    db.upsert_route(&Route::new(100, 10, 20))
        .expect("Failed to upsert route");
}

pub fn at(second: i64) -> Timestamp {
    Timestamp::from_second(second).expect("Invalid test timestamp")
}

/// A valid direct quote on route 100 observed at `quote_second`.
pub fn direct_quote(price: f64, quote_second: i64) -> NewQuote {
    NewQuote {
        route_id: 100,
        carrier_id: 2,
        departure_time: at(1_735_722_000),
        landing_time: at(1_735_749_000),
        price,
        currency: Some("GBP".to_string()),
        direct: true,
        layover_minutes: None,
        quote_time: at(quote_second),
        sourcing: "skyscanner".to_string(),
    }
}
