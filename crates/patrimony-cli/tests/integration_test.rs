use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::{TempDir, tempdir};

fn patrimony(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("patrimony"));
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let tmp = tempdir().unwrap();
    patrimony(tmp.path()).arg("init").assert().success();
    tmp
}

#[test]
fn test_help_lists_commands() {
    let tmp = tempdir().unwrap();
    patrimony(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("patrimony"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_commands_need_init() {
    let tmp = tempdir().unwrap();
    patrimony(tmp.path())
        .args(["office", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("patrimony.json not found"));
}

#[test]
fn test_init_writes_config_once() {
    let tmp = project();
    assert!(tmp.path().join("patrimony.json").exists());
    patrimony(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_office_add_then_search() {
    let tmp = project();
    patrimony(tmp.path())
        .args([
            "office",
            "add",
            "--kind",
            "open-space",
            "--name",
            "Open Space RDC",
            "--level",
            "RDC",
            "--surface",
            "50",
            "--capacity",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created office 1"));
    patrimony(tmp.path())
        .args(["office", "add", "--kind", "box-office", "--name", "Direction"])
        .assert()
        .success();

    patrimony(tmp.path())
        .args(["office", "list", "--search", "open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open Space RDC"))
        .stdout(predicate::str::contains("Direction").not());
}

#[test]
fn test_overcrowded_office_is_rejected() {
    let tmp = project();
    patrimony(tmp.path())
        .args([
            "office",
            "add",
            "--kind",
            "box-office",
            "--surface",
            "10",
            "--capacity",
            "20",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The form has errors"))
        .stderr(predicate::str::contains("validation failed"));

    patrimony(tmp.path())
        .args(["office", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_negative_capacity_is_a_field_error() {
    let tmp = project();
    patrimony(tmp.path())
        .args(["room", "add", "--kind", "meeting", "--capacity", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("capacity:"));
}

#[test]
fn test_equipment_needs_exactly_one_location() {
    let tmp = project();
    patrimony(tmp.path())
        .args(["office", "add", "--kind", "partitioned"])
        .assert()
        .success();
    patrimony(tmp.path())
        .args(["room", "add", "--kind", "training"])
        .assert()
        .success();

    patrimony(tmp.path())
        .args(["equipment", "add", "--name", "Desk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("_form:"));
    patrimony(tmp.path())
        .args(["equipment", "add", "--name", "Desk", "--room", "1", "--office", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("_form:"));
    patrimony(tmp.path())
        .args(["equipment", "add", "--name", "Desk", "--office", "1"])
        .assert()
        .success();
}

#[test]
fn test_room_delete_cascades_to_equipment() {
    let tmp = project();
    patrimony(tmp.path())
        .args([
            "room",
            "add",
            "--kind",
            "meeting",
            "--name",
            "Salle A",
            "--capacity",
            "10",
            "--surface",
            "20",
        ])
        .assert()
        .success();
    patrimony(tmp.path())
        .args([
            "equipment",
            "add",
            "--room",
            "1",
            "--name",
            "Projector",
            "--quantity",
            "2",
            "--price",
            "450",
        ])
        .assert()
        .success();

    patrimony(tmp.path())
        .args(["equipment", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room: Salle A"))
        .stdout(predicate::str::contains("value 900"));

    patrimony(tmp.path())
        .args(["room", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 equipment removed"));

    patrimony(tmp.path())
        .args(["equipment", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

fn decimal(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[test]
fn test_dashboard_json_totals() {
    let tmp = project();
    patrimony(tmp.path())
        .args(["room", "add", "--kind", "plenary", "--capacity", "50", "--surface", "100"])
        .assert()
        .success();
    patrimony(tmp.path())
        .args([
            "equipment",
            "add",
            "--room",
            "1",
            "--name",
            "Chair",
            "--quantity",
            "50",
            "--price",
            "20",
            "--state",
            "poor",
        ])
        .assert()
        .success();

    let output = patrimony(tmp.path())
        .args(["dashboard", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["rooms"]["count"], 1);
    assert_eq!(decimal(&summary["rooms"]["mean_occupancy"]), dec!(0.5));
    assert_eq!(decimal(&summary["equipment"]["total_value"]), dec!(1000));
    assert_eq!(summary["equipment"]["by_state"]["poor"], 1);
    assert!(summary["equipment"]["by_state"].get("good").is_none());
}

#[test]
fn test_admin_shows_registered_change_lists() {
    let tmp = project();
    patrimony(tmp.path())
        .args(["office", "add", "--kind", "whole-floor", "--name", "Etage 2"])
        .assert()
        .success();
    patrimony(tmp.path())
        .arg("admin")
        .assert()
        .success()
        .stdout(predicate::str::contains("Patrimony management"))
        .stdout(predicate::str::contains("Manager"))
        .stdout(predicate::str::contains("Etage 2 | Whole floor"));
}

#[test]
fn test_sql_prints_tables_for_backend() {
    let tmp = tempdir().unwrap();
    patrimony(tmp.path())
        .args(["sql", "--backend", "sqlite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE"))
        .stdout(predicate::str::contains("\"equipment\""));
}

#[test]
fn test_schema_prints_room_form() {
    let tmp = tempdir().unwrap();
    patrimony(tmp.path())
        .args(["schema", "room"])
        .assert()
        .success()
        .stdout(predicate::str::contains("equipment_notes"));
}

#[test]
fn test_office_edit_clears_capacity() {
    let tmp = project();
    patrimony(tmp.path())
        .args(["office", "add", "--kind", "partitioned", "--surface", "12", "--capacity", "3"])
        .assert()
        .success();
    patrimony(tmp.path())
        .args(["office", "edit", "1", "--clear-capacity"])
        .assert()
        .success();

    let output = patrimony(tmp.path())
        .args(["office", "show", "1", "--json"])
        .output()
        .unwrap();
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(shown["office"].get("capacity").is_none());
    assert_eq!(decimal(&shown["office"]["surface_area"]), dec!(12));
}

#[test]
fn test_clear_flag_conflicts_with_value() {
    let tmp = project();
    patrimony(tmp.path())
        .args(["office", "add", "--kind", "partitioned"])
        .assert()
        .success();
    patrimony(tmp.path())
        .args(["office", "edit", "1", "--capacity", "2", "--clear-capacity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
