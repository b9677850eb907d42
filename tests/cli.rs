//! CLI integration tests for cilint
//!
//! These tests run the real binary against temp files and verify the
//! report text, the JSON format, and exit codes.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the cilint binary
fn cilint_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("cilint"))
}

/// Write a config file into the temp dir and return its path
fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const VALID: &str = "stages:\n  - build\n\nbuild:\n  stage: build\n  script: echo \"hello\"\n";

const INVALID_NEEDS: &str =
    "stages:\n  - build\n\nbuild:\n  stage: build\n  needs: [nonexistent]\n  script: echo\n";

// =============================================================================
// Basic invocation
// =============================================================================

#[test]
fn test_help_shows_usage() {
    cilint_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("FILE"));
}

#[test]
fn test_no_files_is_a_usage_error() {
    cilint_cmd().assert().failure();
}

#[test]
fn test_valid_file_exits_zero() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "ci.yml", VALID);

    cilint_cmd()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_invalid_file_exits_nonzero_with_message() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "ci.yml", INVALID_NEEDS);

    cilint_cmd()
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("nonexistent"))
        .stdout(predicate::str::contains("has 1 errors"));
}

#[test]
fn test_nonexistent_file_reported_not_crashed() {
    cilint_cmd()
        .arg("/nonexistent/file.yml")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Could not read file"));
}

// =============================================================================
// Output formats
// =============================================================================

#[test]
fn test_json_format_valid_file() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "ci.yml", VALID);

    let output = cilint_cmd()
        .args(["--format", "json"])
        .arg(&file)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entry = &report[file.to_str().unwrap()];
    assert_eq!(entry.as_array().unwrap().len(), 0);
}

#[test]
fn test_json_format_invalid_file() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "ci.yml", INVALID_NEEDS);

    let output = cilint_cmd()
        .args(["--format", "json"])
        .arg(&file)
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = report[file.to_str().unwrap()].as_array().unwrap().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["kind"], "dangling_reference");
    assert!(entries[0]["message"]
        .as_str()
        .unwrap()
        .contains("nonexistent"));
}

#[test]
fn test_short_format_flag() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "ci.yml", VALID);

    let output = cilint_cmd().args(["-f", "json"]).arg(&file).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

// =============================================================================
// Multiple files
// =============================================================================

#[test]
fn test_two_valid_files_exit_zero() {
    let dir = TempDir::new().unwrap();
    let file1 = write_config(&dir, "a.yml", VALID);
    let file2 = write_config(&dir, "b.yml", VALID);

    cilint_cmd().arg(&file1).arg(&file2).assert().success();
}

#[test]
fn test_one_invalid_file_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let good = write_config(&dir, "good.yml", VALID);
    let bad = write_config(&dir, "bad.yml", INVALID_NEEDS);

    cilint_cmd()
        .arg(&good)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("good.yml is valid"))
        .stdout(predicate::str::contains("nonexistent"));
}

#[test]
fn test_json_format_keys_every_file() {
    let dir = TempDir::new().unwrap();
    let file1 = write_config(&dir, "a.yml", VALID);
    let file2 = write_config(&dir, "b.yml", VALID);

    let output = cilint_cmd()
        .args(["--format", "json"])
        .arg(&file1)
        .arg(&file2)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let object = report.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains_key(file1.to_str().unwrap()));
    assert!(object.contains_key(file2.to_str().unwrap()));
}

// =============================================================================
// Verbose mode
// =============================================================================

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "ci.yml", VALID);

    cilint_cmd()
        .arg("--verbose")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose"));
}
