use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// A plain-output command bound to the store in `temp_dir`
fn farewatch_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("farewatch").expect("Failed to find farewatch binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Carrier 2, airports 10/20/30, direct route 100 and route 101 via 30
fn seed(temp_dir: &TempDir) {
    farewatch_cmd(temp_dir)
        .args(["carrier", "upsert", "2", "Virgin Airways", "--country", "UK"])
        .assert()
        .success();
    for (id, name) in [("10", "LHR"), ("20", "JFK"), ("30", "DUB")] {
        farewatch_cmd(temp_dir)
            .args(["airport", "upsert", id, name])
            .assert()
            .success();
    }
    farewatch_cmd(temp_dir)
        .args(["route", "upsert", "100", "10", "20"])
        .assert()
        .success();
    farewatch_cmd(temp_dir)
        .args(["route", "upsert", "101", "10", "20", "--via", "30"])
        .assert()
        .success();
}

fn add_quote(temp_dir: &TempDir, price: &str, quoted_at: &str) -> assert_cmd::assert::Assert {
    farewatch_cmd(temp_dir)
        .args([
            "quote",
            "add",
            "--route",
            "100",
            "--carrier",
            "2",
            "--departs",
            "2025-03-01T09:00:00Z",
            "--lands",
            "2025-03-01T16:30:00Z",
            "--price",
            price,
            "--direct",
            "--quoted-at",
            quoted_at,
            "--source",
            "skyscanner",
        ])
        .assert()
}

#[test]
fn test_cli_init_lists_tables() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fare store ready"))
        .stdout(predicate::str::contains("- CARRIER"))
        .stdout(predicate::str::contains("- ROUTE_LAYOVER"))
        .stdout(predicate::str::contains("- QUOTE"));
}

#[test]
fn test_cli_default_lists_tables() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Tables"))
        .stdout(predicate::str::contains("- AIRPORT"));
}

#[test]
fn test_cli_carrier_upsert_and_show() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .args(["carrier", "upsert", "1", "Virgin Group"])
        .assert()
        .success();
    farewatch_cmd(&temp_dir)
        .args([
            "carrier",
            "upsert",
            "2",
            "Virgin Airways",
            "--parent",
            "1",
            "--flag",
            "long-haul,atlantic",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 2. Virgin Airways"))
        .stdout(predicate::str::contains("- Flags: atlantic, long-haul"));

    farewatch_cmd(&temp_dir)
        .args(["carrier", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Parent carrier: 1"))
        .stdout(predicate::str::contains("### Parent chain"))
        .stdout(predicate::str::contains("## 1. Virgin Group"));
}

#[test]
fn test_cli_carrier_cycle_fails() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .args(["carrier", "upsert", "1", "Group"])
        .assert()
        .success();
    farewatch_cmd(&temp_dir)
        .args(["carrier", "upsert", "2", "Mainline", "--parent", "1"])
        .assert()
        .success();
    farewatch_cmd(&temp_dir)
        .args(["carrier", "upsert", "1", "Group", "--parent", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to save carrier 1"));
}

#[test]
fn test_cli_missing_parent_fails() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .args(["carrier", "upsert", "3", "Regional", "--parent", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Carrier with ID 9 not found"));
}

#[test]
fn test_cli_route_layovers() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    farewatch_cmd(&temp_dir)
        .args(["route", "show", "101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Route 101: 10 → 30 → 20"))
        .stdout(predicate::str::contains("- Layovers: 1"));

    farewatch_cmd(&temp_dir)
        .args(["route", "list", "--from", "10", "--to", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Route 100"))
        .stdout(predicate::str::contains("## Route 101"));
}

#[test]
fn test_cli_route_with_unknown_airport_fails() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    farewatch_cmd(&temp_dir)
        .args(["route", "upsert", "102", "10", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Airport with ID 99 not found"));
}

#[test]
fn test_cli_show_missing_route() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .args(["route", "show", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Route with ID 5 not found"));
}

#[test]
fn test_cli_add_and_list_quotes() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    add_quote(&temp_dir, "450", "2025-01-10T12:00:00Z")
        .success()
        .stdout(predicate::str::contains("450.00 GBP"))
        .stdout(predicate::str::contains("- Duration: 7h 30m"));
    add_quote(&temp_dir, "430", "2025-01-12T12:00:00Z").success();
    add_quote(&temp_dir, "470", "2025-01-20T12:00:00Z").success();

    let output = farewatch_cmd(&temp_dir)
        .args([
            "quote",
            "list",
            "--route",
            "100",
            "--since",
            "2025-01-10T12:00:00Z",
            "--until",
            "2025-01-15T00:00:00Z",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).expect("Invalid UTF-8");

    let first = output.find("450.00").expect("450 quote missing");
    let second = output.find("430.00").expect("430 quote missing");
    assert!(first < second, "quotes should be oldest first:\n{output}");
    assert!(!output.contains("470.00"));
}

#[test]
fn test_cli_list_quotes_descending_with_limit() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    add_quote(&temp_dir, "450", "2025-01-10T12:00:00Z").success();
    add_quote(&temp_dir, "430", "2025-01-12T12:00:00Z").success();

    farewatch_cmd(&temp_dir)
        .args(["quote", "list", "--desc", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("430.00"))
        .stdout(predicate::str::contains("450.00").not());
}

#[test]
fn test_cli_direct_quote_on_layover_route_fails() {
    let temp_dir = create_cli_test_environment();
    seed(&temp_dir);

    farewatch_cmd(&temp_dir)
        .args([
            "quote",
            "add",
            "--route",
            "101",
            "--carrier",
            "2",
            "--departs",
            "2025-03-01T09:00:00Z",
            "--lands",
            "2025-03-01T18:00:00Z",
            "--price",
            "380",
            "--direct",
            "--source",
            "kayak",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to record quote"));

    farewatch_cmd(&temp_dir)
        .args(["quote", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No quotes found."));
}

#[test]
fn test_cli_direct_conflicts_with_layover_minutes() {
    let temp_dir = create_cli_test_environment();

    farewatch_cmd(&temp_dir)
        .args([
            "quote",
            "add",
            "--route",
            "100",
            "--carrier",
            "2",
            "--departs",
            "2025-03-01T09:00:00Z",
            "--lands",
            "2025-03-01T16:30:00Z",
            "--price",
            "450",
            "--direct",
            "--layover-minutes",
            "60",
            "--source",
            "kayak",
        ])
        .assert()
        .failure();
}

#[test]
fn test_cli_import_batch() {
    let temp_dir = create_cli_test_environment();
    let batch_path = temp_dir.path().join("batch.json");
    fs::write(
        &batch_path,
        r#"{
            "carriers": [{"id": 2, "name": "Virgin Airways", "country": "UK"}],
            "airports": [{"id": 10, "name": "LHR"}, {"id": 20, "name": "JFK"}],
            "routes": [{"id": 100, "start_airport_id": 10, "end_airport_id": 20}],
            "quotes": [{
                "route_id": 100,
                "carrier_id": 2,
                "departure_time": "2025-03-01T09:00:00Z",
                "landing_time": "2025-03-01T16:30:00Z",
                "price": 450.0,
                "direct": true,
                "quote_time": "2025-01-10T12:00:00Z",
                "sourcing": "skyscanner"
            }]
        }"#,
    )
    .unwrap();

    farewatch_cmd(&temp_dir)
        .args(["import", batch_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrote 1 carriers, 2 airports, 1 routes and 1 quotes.",
        ));

    farewatch_cmd(&temp_dir)
        .args(["quote", "list", "--route", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("450.00 GBP"));
}

#[test]
fn test_cli_import_rolls_back_on_bad_reference() {
    let temp_dir = create_cli_test_environment();
    let batch_path = temp_dir.path().join("batch.json");
    fs::write(
        &batch_path,
        r#"{
            "airports": [{"id": 10, "name": "LHR"}],
            "routes": [{"id": 100, "start_airport_id": 10, "end_airport_id": 20}]
        }"#,
    )
    .unwrap();

    farewatch_cmd(&temp_dir)
        .args(["import", batch_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing was written"));

    farewatch_cmd(&temp_dir)
        .args(["airport", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No airports found."));
}

#[test]
fn test_cli_config_file_sets_currency() {
    let temp_dir = create_cli_test_environment();
    let config_path = temp_dir.path().join("farewatch.json");
    let db_path = temp_dir.path().join("configured.db");
    fs::write(
        &config_path,
        format!(
            r#"{{"database": {}, "currency_default": "EUR"}}"#,
            serde_json::to_string(&db_path).unwrap()
        ),
    )
    .unwrap();

    let configured = || {
        let mut cmd = Command::cargo_bin("farewatch").expect("Failed to find farewatch binary");
        cmd.arg("--no-color").arg("--config").arg(&config_path);
        cmd
    };

    configured()
        .args(["carrier", "upsert", "2", "Virgin Airways"])
        .assert()
        .success();
    configured()
        .args(["airport", "upsert", "10", "LHR"])
        .assert()
        .success();
    configured()
        .args(["airport", "upsert", "20", "JFK"])
        .assert()
        .success();
    configured()
        .args(["route", "upsert", "100", "10", "20"])
        .assert()
        .success();
    configured()
        .args([
            "quote",
            "add",
            "--route",
            "100",
            "--carrier",
            "2",
            "--departs",
            "2025-03-01T09:00:00Z",
            "--lands",
            "2025-03-01T16:30:00Z",
            "--price",
            "520",
            "--source",
            "kayak",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("520.00 EUR"));

    assert!(db_path.exists());
}
