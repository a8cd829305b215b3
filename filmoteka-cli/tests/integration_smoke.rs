//! Smoke tests for the filmoteka binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("filmoteka").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help_shows_session_flags() {
    let mut cmd = Command::cargo_bin("filmoteka").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--admin-user"))
        .stdout(predicate::str::contains("--reader-user"))
        .stdout(predicate::str::contains("--shutdown-grace"));
}

#[test]
fn test_serve_exits_when_sessions_cannot_open() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("app.log");

    let mut cmd = Command::cargo_bin("filmoteka").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["serve", "--bind", "127.0.0.1:0"])
        .args(["--db-host", "127.0.0.1", "--db-port", "1"])
        .args(["--connect-timeout", "1"])
        .arg("--log-file")
        .arg(&log_file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open database sessions"));

    assert!(log_file.exists(), "log file should be created before connecting");
}

#[test]
fn test_rejects_unknown_subcommand() {
    let mut cmd = Command::cargo_bin("filmoteka").unwrap();
    cmd.arg("migrate");

    cmd.assert().failure();
}
