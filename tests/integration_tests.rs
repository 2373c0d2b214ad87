//! Integration tests for the stockroom CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A stockroom command isolated from the user's config and environment
fn stockroom(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stockroom").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env_remove("STOCKROOM_DATA")
        .env_remove("STOCKROOM_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn data_file(tmp: &TempDir) -> PathBuf {
    tmp.path().join("inventory.yaml")
}

/// Run a command against the test data file and return its stdout
fn run_ok(tmp: &TempDir, args: &[&str]) -> String {
    let output = stockroom(tmp)
        .arg("--data")
        .arg(data_file(tmp))
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Company with Bolt (C1), Acme (S1) and Globex (S2), Bolt linked to Acme
fn setup_bolt_and_acme() -> TempDir {
    let tmp = TempDir::new().unwrap();
    run_ok(&tmp, &["component", "add", "Bolt"]);
    run_ok(&tmp, &["supplier", "add", "Acme", "Globex"]);
    run_ok(&tmp, &["link", "C1", "S1"]);
    tmp
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("component"))
        .stdout(predicate::str::contains("supplier"))
        .stdout(predicate::str::contains("order"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockroom"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp).arg("warehouse").assert().failure();
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stockroom"));
}

// ============================================================================
// Component and Supplier Tests
// ============================================================================

#[test]
fn test_ids_are_sequential_per_kind() {
    let tmp = TempDir::new().unwrap();
    let out = run_ok(&tmp, &["-q", "component", "add", "Bolt", "Nut", "Washer"]);
    assert_eq!(out, "C1\nC2\nC3\n");
    let out = run_ok(&tmp, &["-q", "supplier", "add", "Acme"]);
    assert_eq!(out, "S1\n");
}

#[test]
fn test_new_component_has_no_stock() {
    let tmp = TempDir::new().unwrap();
    run_ok(&tmp, &["component", "add", "Bolt"]);
    let out = run_ok(&tmp, &["component", "show", "C1", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["id"], "C1");
    assert_eq!(json["name"], "Bolt");
    assert_eq!(json["stock"], 0);
}

#[test]
fn test_blank_name_is_rejected_and_nothing_is_saved() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["component", "add", "Bolt", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be blank"));
    assert!(!data_file(&tmp).exists());
}

#[test]
fn test_component_list_formats() {
    let tmp = setup_bolt_and_acme();
    run_ok(&tmp, &["component", "add", "Nut"]);

    let ids = run_ok(&tmp, &["component", "list", "--format", "id"]);
    assert_eq!(ids, "C1\nC2\n");

    let count = run_ok(&tmp, &["component", "list", "--count"]);
    assert_eq!(count.trim(), "2");

    let tsv = run_ok(&tmp, &["component", "list"]);
    assert!(tsv.contains("Bolt"));
    assert!(tsv.contains("2 components found."));

    let md = run_ok(&tmp, &["component", "list", "--format", "md"]);
    assert!(md.lines().next().unwrap().starts_with('|'));

    let filtered = run_ok(&tmp, &["component", "list", "--search", "nu", "--format", "id"]);
    assert_eq!(filtered, "C2\n");
}

#[test]
fn test_empty_lists() {
    let tmp = TempDir::new().unwrap();
    let out = run_ok(&tmp, &["supplier", "list"]);
    assert!(out.contains("No suppliers found."));
    let out = run_ok(&tmp, &["order", "list"]);
    assert!(out.contains("No pending orders found."));
}

#[test]
fn test_read_only_commands_do_not_create_the_data_file() {
    let tmp = TempDir::new().unwrap();
    run_ok(&tmp, &["component", "list"]);
    run_ok(&tmp, &["order", "list"]);
    assert!(!data_file(&tmp).exists());
}

#[test]
fn test_show_unknown_component_fails() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["component", "show", "C7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_supplier_show_lists_components() {
    let tmp = setup_bolt_and_acme();
    let out = run_ok(&tmp, &["supplier", "show", "S1"]);
    assert!(out.contains("Acme"));
    assert!(out.contains("Bolt"));
    assert!(out.contains("C1"));
}

// ============================================================================
// Link Tests
// ============================================================================

#[test]
fn test_link_twice_fails() {
    let tmp = setup_bolt_and_acme();
    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["link", "C1", "S1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already associated"));

    let out = run_ok(&tmp, &["component", "show", "C1", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["suppliers"].as_array().unwrap().len(), 1);
}

#[test]
fn test_link_unknown_supplier_fails() {
    let tmp = setup_bolt_and_acme();
    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["link", "C1", "S9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// Stock and Order Tests
// ============================================================================

#[test]
fn test_bolt_and_acme_scenario() {
    let tmp = setup_bolt_and_acme();

    // Unassociated pair
    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["order", "place", "C1", "S2", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not supply"));

    let id = run_ok(&tmp, &["-q", "order", "place", "C1", "S1", "100"]);
    assert_eq!(id.trim(), "O1");

    let out = run_ok(&tmp, &["order", "fulfill", "O1", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["stock"], 100);
    assert_eq!(json["quantity_supplied_to_date"], 100);

    let pending = run_ok(&tmp, &["order", "list", "--count"]);
    assert_eq!(pending.trim(), "0");

    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["order", "fulfill", "O1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_failed_order_does_not_use_an_id() {
    let tmp = setup_bolt_and_acme();
    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["order", "place", "C1", "S1", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));

    let id = run_ok(&tmp, &["-q", "order", "place", "C1", "S1", "5"]);
    assert_eq!(id.trim(), "O1");
}

#[test]
fn test_fulfill_prints_relation_totals() {
    let tmp = setup_bolt_and_acme();
    run_ok(&tmp, &["order", "place", "C1", "S1", "30"]);
    run_ok(&tmp, &["order", "place", "C1", "S1", "12"]);
    run_ok(&tmp, &["order", "fulfill", "O1"]);
    let out = run_ok(&tmp, &["order", "fulfill", "O2"]);
    assert!(out.contains("Total quantity received from Acme: 42"));
    assert!(out.contains("Quantity on hand: 42"));
}

#[test]
fn test_assign_within_and_beyond_stock() {
    let tmp = setup_bolt_and_acme();
    run_ok(&tmp, &["order", "place", "C1", "S1", "10"]);
    run_ok(&tmp, &["order", "fulfill", "O1"]);

    let stock = run_ok(&tmp, &["-q", "component", "assign", "C1", "4"]);
    assert_eq!(stock.trim(), "6");

    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["component", "assign", "C1", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only 6 on hand"));

    stockroom(&tmp)
        .arg("--data")
        .arg(data_file(&tmp))
        .args(["component", "assign", "C1", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid quantity"));

    let out = run_ok(&tmp, &["component", "show", "C1", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["stock"], 6);
}

#[test]
fn test_order_list_filters() {
    let tmp = setup_bolt_and_acme();
    run_ok(&tmp, &["link", "C1", "S2"]);
    run_ok(&tmp, &["order", "place", "C1", "S1", "10"]);
    run_ok(&tmp, &["order", "place", "C1", "S2", "20"]);

    let ids = run_ok(&tmp, &["order", "list", "--supplier", "S2", "--format", "id"]);
    assert_eq!(ids, "O2\n");
    let all = run_ok(&tmp, &["order", "list", "--format", "id"]);
    assert_eq!(all, "O1\nO2\n");
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_ids_continue_after_reload() {
    let tmp = setup_bolt_and_acme();
    run_ok(&tmp, &["order", "place", "C1", "S1", "1"]);
    run_ok(&tmp, &["order", "fulfill", "O1"]);

    let id = run_ok(&tmp, &["-q", "order", "place", "C1", "S1", "1"]);
    assert_eq!(id.trim(), "O2");
    let id = run_ok(&tmp, &["-q", "component", "add", "Nut"]);
    assert_eq!(id.trim(), "C2");

    let content = fs::read_to_string(data_file(&tmp)).unwrap();
    assert!(content.contains("version: 1"));
    assert!(content.contains("pending_orders"));
}

#[test]
fn test_corrupt_data_file_is_moved_aside() {
    let tmp = TempDir::new().unwrap();
    fs::write(data_file(&tmp), "components: [unterminated").unwrap();

    // Reading starts over without touching the file
    let out = run_ok(&tmp, &["component", "list", "--count"]);
    assert_eq!(out.trim(), "0");
    assert!(data_file(&tmp).exists());

    let id = run_ok(&tmp, &["-q", "component", "add", "Bolt"]);
    assert_eq!(id.trim(), "C1");

    let corrupt = tmp.path().join("inventory.yaml.corrupt");
    assert_eq!(
        fs::read_to_string(corrupt).unwrap(),
        "components: [unterminated"
    );
}

#[test]
fn test_data_file_from_env_and_local_config() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .env("STOCKROOM_DATA", tmp.path().join("from-env.yaml"))
        .args(["component", "add", "Bolt"])
        .assert()
        .success();
    assert!(tmp.path().join("from-env.yaml").exists());

    fs::write(tmp.path().join("stockroom.yaml"), "data_file: from-config.yaml\n").unwrap();
    stockroom(&tmp)
        .args(["supplier", "add", "Acme"])
        .assert()
        .success();
    assert!(tmp.path().join("from-config.yaml").exists());
}

#[test]
fn test_default_data_file_name() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .args(["component", "add", "Bolt"])
        .assert()
        .success();
    assert!(tmp.path().join("CompanyData.yaml").exists());
}

#[test]
fn test_shell_requires_a_terminal() {
    let tmp = TempDir::new().unwrap();
    stockroom(&tmp)
        .arg("shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("terminal"));
}
