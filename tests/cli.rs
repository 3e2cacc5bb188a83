/*!
 * Integration tests for the dotdump binary
 */

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn dotdump() -> Command {
    Command::cargo_bin("dotdump").unwrap()
}

#[test]
fn test_default_run_writes_text_report() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "TOKEN=abc\n").unwrap();
    fs::create_dir(temp_dir.path().join("node_modules")).unwrap();
    fs::write(temp_dir.path().join("node_modules").join(".env"), "NOPE=1\n").unwrap();

    dotdump()
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("hidden_dump.txt"));

    let report = fs::read_to_string(temp_dir.path().join("hidden_dump.txt")).unwrap();
    assert!(report.contains("TOKEN=abc"));
    assert!(!report.contains("NOPE=1"));
}

#[test]
fn test_missing_root_exits_non_zero() {
    let temp_dir = tempdir().unwrap();
    dotdump()
        .arg(temp_dir.path().join("does-not-exist"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_root_message_is_localized() {
    let temp_dir = tempdir().unwrap();
    dotdump()
        .arg(temp_dir.path().join("does-not-exist"))
        .args(["--lang", "vi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("không tồn tại"));
}

#[test]
fn test_json_format_and_output_flag() {
    let temp_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let output = out_dir.path().join("dump.json");
    fs::write(temp_dir.path().join("settings.toml"), "debug = true\n").unwrap();
    fs::write(temp_dir.path().join(".bashrc"), "alias ll='ls -l'\n").unwrap();

    dotdump()
        .arg(temp_dir.path())
        .args(["--format", "json", "--filter", "config", "-q", "-o"])
        .arg(&output)
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed["settings.toml"], "debug = true\n");
    assert!(parsed.get(".bashrc").is_none());
}

#[test]
fn test_dry_run_leaves_bodies_empty() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".npmrc"), "registry=https://example.invalid\n").unwrap();

    dotdump()
        .arg(temp_dir.path())
        .args(["--dry-run", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));

    let report = fs::read_to_string(temp_dir.path().join("hidden_dump.md")).unwrap();
    assert!(report.contains("### `.npmrc`"));
    assert!(!report.contains("registry="));
}

#[test]
fn test_invalid_max_size_is_a_usage_error() {
    dotdump()
        .args([".", "--max-size", "huge"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid size"));
}

#[test]
fn test_skipped_files_do_not_fail_the_run() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".big"), "x".repeat(4096)).unwrap();
    fs::write(temp_dir.path().join(".bin"), [0u8, 1, 2, 3]).unwrap();

    dotdump()
        .arg(temp_dir.path())
        .args(["--max-size", "1K"])
        .assert()
        .success();

    let report = fs::read_to_string(temp_dir.path().join("hidden_dump.txt")).unwrap();
    assert!(report.contains(".big [too large]"));
    assert!(report.contains(".bin [binary]"));
}
