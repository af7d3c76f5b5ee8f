//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// === Serve Command Tests ===

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("skipped if categories exist"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("serve").arg("--in-memory").arg("--bind").arg("not-an-addr");

    cmd.assert().failure();
}

// === Database Command Tests ===

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Drop all tables"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Empty every table"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("migrate")
        .env_remove("DATABASE_URL")
        .current_dir(std::env::temp_dir());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}
