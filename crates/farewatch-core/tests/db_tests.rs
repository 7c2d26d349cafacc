mod common;

use std::fs;

use common::create_test_db;
use farewatch_core::{Airport, Carrier, Database, Entity, Route, StoreConfig, StoreError};
use rusqlite::Connection;
use tempfile::TempDir;

#[test]
fn test_database_initialization() {
    let (temp_dir, db) = create_test_db();

    assert!(temp_dir.path().join("fares.db").exists());
    assert_eq!(
        db.list_tables().expect("Failed to list tables"),
        vec!["AIRPORT", "CARRIER", "QUOTE", "ROUTE", "ROUTE_LAYOVER"]
    );
    assert_eq!(db.stored_schema_version().unwrap(), 1);
}

#[test]
fn test_ensure_schema_is_idempotent() {
    let (_temp_dir, db) = create_test_db();

    db.ensure_schema().expect("Second ensure_schema failed");
    db.ensure_schema().expect("Third ensure_schema failed");
    assert_eq!(db.list_tables().unwrap().len(), 5);
}

#[test]
fn test_connect_to_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::new(temp_dir.path().join("no/such/dir/fares.db"));

    let err = Database::connect(&config).err().expect("Connect should fail");
    assert!(matches!(err, StoreError::Connection { .. }));
}

#[test]
fn test_connect_to_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.db");
    fs::write(&path, vec![0x5a_u8; 4096]).unwrap();

    let err = Database::connect(&StoreConfig::new(&path))
        .err()
        .expect("Connect should fail");
    assert!(matches!(err, StoreError::Connection { .. }));
}

#[test]
fn test_incompatible_existing_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("legacy.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE CARRIER (carrier_id INTEGER PRIMARY KEY, carrier_name TEXT)")
        .unwrap();

    let db = Database::connect(&StoreConfig::new(&path)).unwrap();
    match db.ensure_schema() {
        Err(StoreError::Schema { table, reason }) => {
            assert_eq!(table, "CARRIER");
            assert!(reason.contains("parent_carrier_id"));
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_schema_version_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("future.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 7")
        .unwrap();

    let db = Database::connect(&StoreConfig::new(&path)).unwrap();
    assert!(matches!(db.ensure_schema(), Err(StoreError::Schema { .. })));
}

#[test]
fn test_unknown_configured_schema_version() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = StoreConfig::new(temp_dir.path().join("fares.db"));
    config.schema_version = 2;

    let db = Database::connect(&config).unwrap();
    assert!(matches!(db.ensure_schema(), Err(StoreError::Schema { .. })));
}

#[test]
fn test_close_releases_connection() {
    let (temp_dir, db) = create_test_db();
    db.close().expect("Failed to close");

    let config = StoreConfig::new(temp_dir.path().join("fares.db"));
    let db = Database::connect(&config).expect("Failed to reconnect");
    db.ensure_schema().expect("Schema should still be compatible");
}

#[test]
fn test_upsert_carrier_is_idempotent() {
    let (_temp_dir, mut db) = create_test_db();
    let carrier = Carrier::new(2, "Virgin Airways").with_country("UK");

    db.upsert_carrier(&carrier).expect("First upsert failed");
    db.upsert_carrier(&carrier).expect("Second upsert failed");

    let carriers = db.list_carriers().unwrap();
    assert_eq!(carriers, vec![carrier]);
}

#[test]
fn test_upsert_carrier_updates_fields() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_carrier(&Carrier::new(2, "Virgin Airways")).unwrap();

    let updated = Carrier::new(2, "Virgin Atlantic")
        .with_country("UK")
        .with_flag("long-haul");
    db.upsert_carrier(&updated).unwrap();

    let stored = db.get_carrier(2).unwrap().expect("Carrier should exist");
    assert_eq!(stored, updated);
    assert_eq!(db.list_carriers().unwrap().len(), 1);
}

#[test]
fn test_get_missing_carrier() {
    let (_temp_dir, db) = create_test_db();
    assert!(db.get_carrier(99).unwrap().is_none());
}

#[test]
fn test_carrier_parent_must_exist() {
    let (_temp_dir, mut db) = create_test_db();

    let err = db
        .upsert_carrier(&Carrier::new(3, "Little Red").with_parent(2))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Referential {
            entity: Entity::Carrier,
            id: 2
        }
    ));
    assert!(db.list_carriers().unwrap().is_empty());
}

#[test]
fn test_carrier_cycle_is_rejected() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_carrier(&Carrier::new(1, "Holding")).unwrap();
    db.upsert_carrier(&Carrier::new(2, "Mainline").with_parent(1))
        .unwrap();
    db.upsert_carrier(&Carrier::new(3, "Regional").with_parent(2))
        .unwrap();

    // Making the holding company a subsidiary of its own grandchild closes a loop.
    let err = db
        .upsert_carrier(&Carrier::new(1, "Holding").with_parent(3))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { ref field, .. } if field == "parent_id"));

    let holding = db.get_carrier(1).unwrap().unwrap();
    assert_eq!(holding.parent_id, None);
}

#[test]
fn test_carrier_self_parent_is_rejected() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_carrier(&Carrier::new(1, "Holding")).unwrap();

    let err = db
        .upsert_carrier(&Carrier::new(1, "Holding").with_parent(1))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
}

#[test]
fn test_carrier_reparenting_without_cycle() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_carrier(&Carrier::new(1, "Group A")).unwrap();
    db.upsert_carrier(&Carrier::new(2, "Group B")).unwrap();
    db.upsert_carrier(&Carrier::new(3, "Regional").with_parent(1))
        .unwrap();

    db.upsert_carrier(&Carrier::new(3, "Regional").with_parent(2))
        .expect("Moving to a sibling group is allowed");
    assert_eq!(db.get_carrier(3).unwrap().unwrap().parent_id, Some(2));
}

#[test]
fn test_carrier_ancestors() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_carrier(&Carrier::new(1, "Holding")).unwrap();
    db.upsert_carrier(&Carrier::new(2, "Mainline").with_parent(1))
        .unwrap();
    db.upsert_carrier(&Carrier::new(3, "Regional").with_parent(2))
        .unwrap();

    let ancestors: Vec<u64> = db
        .carrier_ancestors(3)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ancestors, vec![2, 1]);
    assert!(db.carrier_ancestors(1).unwrap().is_empty());
    assert!(matches!(
        db.carrier_ancestors(42),
        Err(StoreError::Referential { .. })
    ));
}

#[test]
fn test_upsert_airport_is_idempotent() {
    let (_temp_dir, mut db) = create_test_db();
    let airport = Airport::new(10, "LHR")
        .with_country("UK")
        .with_location(51.47, -0.4543);

    db.upsert_airport(&airport).unwrap();
    db.upsert_airport(&airport).unwrap();

    assert_eq!(db.list_airports().unwrap(), vec![airport.clone()]);
    assert_eq!(db.get_airport(10).unwrap(), Some(airport));
}

#[test]
fn test_upsert_airport_validation() {
    let (_temp_dir, mut db) = create_test_db();
    let err = db.upsert_airport(&Airport::new(10, "")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert!(db.list_airports().unwrap().is_empty());
}

#[test]
fn test_route_requires_endpoints() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_airport(&Airport::new(10, "LHR")).unwrap();

    let err = db.upsert_route(&Route::new(100, 10, 20)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Referential {
            entity: Entity::Airport,
            id: 20
        }
    ));
    assert!(db.get_route(100).unwrap().is_none());
}

#[test]
fn test_route_requires_layover_airports() {
    let (_temp_dir, mut db) = create_test_db();
    db.upsert_airport(&Airport::new(10, "LHR")).unwrap();
    db.upsert_airport(&Airport::new(20, "SYD")).unwrap();

    let err = db
        .upsert_route(&Route::new(100, 10, 20).with_layovers([30]))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Referential {
            entity: Entity::Airport,
            id: 30
        }
    ));
}

#[test]
fn test_route_layover_order_round_trip() {
    let (_temp_dir, mut db) = create_test_db();
    for (id, name) in [(10, "LHR"), (20, "SYD"), (30, "DXB"), (40, "SIN"), (50, "KUL")] {
        db.upsert_airport(&Airport::new(id, name)).unwrap();
    }

    let route = Route::new(100, 10, 20).with_layovers([40, 30, 50]);
    db.upsert_route(&route).unwrap();

    let stored = db.get_route(100).unwrap().expect("Route should exist");
    assert_eq!(stored.layovers, vec![40, 30, 50]);
    assert_eq!(stored, route);
}

#[test]
fn test_route_reupsert_replaces_layovers() {
    let (_temp_dir, mut db) = create_test_db();
    for (id, name) in [(10, "LHR"), (20, "SYD"), (30, "DXB"), (40, "SIN")] {
        db.upsert_airport(&Airport::new(id, name)).unwrap();
    }

    db.upsert_route(&Route::new(100, 10, 20).with_layovers([30, 40]))
        .unwrap();
    db.upsert_route(&Route::new(100, 10, 20).with_layovers([40]))
        .unwrap();
    assert_eq!(db.get_layovers(100).unwrap(), vec![40]);

    db.upsert_route(&Route::new(100, 10, 20)).unwrap();
    assert!(db.get_layovers(100).unwrap().is_empty());
    assert_eq!(db.list_routes().unwrap().len(), 1);
}

#[test]
fn test_failed_route_upsert_keeps_previous_layovers() {
    let (_temp_dir, mut db) = create_test_db();
    for (id, name) in [(10, "LHR"), (20, "SYD"), (30, "DXB")] {
        db.upsert_airport(&Airport::new(id, name)).unwrap();
    }
    db.upsert_route(&Route::new(100, 10, 20).with_layovers([30]))
        .unwrap();

    let err = db
        .upsert_route(&Route::new(100, 10, 20).with_layovers([30, 99]))
        .unwrap_err();
    assert!(matches!(err, StoreError::Referential { .. }));
    assert_eq!(db.get_layovers(100).unwrap(), vec![30]);
}

#[test]
fn test_routes_between() {
    let (_temp_dir, mut db) = create_test_db();
    for (id, name) in [(10, "LHR"), (20, "JFK"), (30, "DUB")] {
        db.upsert_airport(&Airport::new(id, name)).unwrap();
    }
    db.upsert_route(&Route::new(100, 10, 20)).unwrap();
    db.upsert_route(&Route::new(101, 10, 20).with_layovers([30]))
        .unwrap();
    db.upsert_route(&Route::new(102, 20, 10)).unwrap();

    let outbound = db.routes_between(10, 20).unwrap();
    assert_eq!(outbound.iter().map(|r| r.id).collect::<Vec<_>>(), vec![100, 101]);
    assert_eq!(outbound[1].layovers, vec![30]);
    assert!(db.routes_between(30, 10).unwrap().is_empty());
}

#[test]
fn test_route_with_direct_quotes_cannot_gain_layovers() {
    let (_temp_dir, mut db) = create_test_db();
    common::seed_direct_route(&mut db);
    db.insert_quote(&common::direct_quote(450.0, 1_735_000_000))
        .expect("Failed to insert direct quote");
    db.upsert_airport(&Airport::new(30, "DUB")).unwrap();

    let err = db
        .upsert_route(&Route::new(100, 10, 20).with_layovers([30]))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { ref field, .. } if field == "layovers"));
    assert!(db.get_layovers(100).unwrap().is_empty());

    // Re-upserting it unchanged is still fine.
    db.upsert_route(&Route::new(100, 10, 20))
        .expect("Unchanged direct route should upsert");
}
