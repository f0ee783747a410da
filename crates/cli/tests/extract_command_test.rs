//! # CLI Extract Command Tests
//!
//! This file contains tests for the `extract` command of the `jsonzip` CLI.

use assert_cmd::prelude::*;
use jsonzip_test_utils::{read_zip_entries, MIXED_CSV, UNRECOGNIZED_CSV};
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

/// Helper to create a temporary CSV fixture within a given directory.
fn create_fixture_file(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let file_path = dir.join("sample.csv");
    let mut file = fs::File::create(&file_path).expect("Failed to create fixture file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to fixture file");
    file_path
}

#[test]
fn test_extract_command_writes_archive() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_file(temp_dir.path(), MIXED_CSV);
    let output_path = temp_dir.path().join("out.zip");

    // Act
    let mut cmd = Command::cargo_bin("jsonzip").unwrap();
    cmd.arg("extract")
        .arg(&fixture_path)
        .arg("--output")
        .arg(&output_path);

    // Assert
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 JSON files to"));

    let entries = read_zip_entries(&fs::read(&output_path).unwrap()).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries["example-1.json"], r#"{"key":"value"}"#);
}

#[test]
fn test_extract_command_into_directory_uses_default_name() {
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_file(temp_dir.path(), MIXED_CSV);

    let mut cmd = Command::cargo_bin("jsonzip").unwrap();
    cmd.arg("extract")
        .arg(&fixture_path)
        .arg("--strict")
        .arg("--output")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("json-files-2.zip"));
    assert!(temp_dir.path().join("json-files-2.zip").exists());
}

#[test]
fn test_extract_command_dry_run_lists_entries() {
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_file(temp_dir.path(), MIXED_CSV);

    let mut cmd = Command::cargo_bin("jsonzip").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("extract")
        .arg(&fixture_path)
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("broken.json"))
        .stdout(predicate::str::contains("3 JSON files would be written"));
    assert!(!temp_dir.path().join("json-files-3.zip").exists());
}

#[test]
fn test_extract_command_no_valid_rows() {
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_file(temp_dir.path(), UNRECOGNIZED_CSV);

    let mut cmd = Command::cargo_bin("jsonzip").unwrap();
    cmd.arg("extract").arg(&fixture_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No valid JSON data found in CSV"));
}

#[test]
fn test_extract_command_no_file() {
    let mut cmd = Command::cargo_bin("jsonzip").unwrap();

    cmd.arg("extract")
        .arg("a/non/existent/file.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
