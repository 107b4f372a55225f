use crate::support::{create_note, jotter, setup_store};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_store() {
    let dir = tempdir().unwrap();

    jotter()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_explicit_store_path() {
    let dir = tempdir().unwrap();

    jotter()
        .current_dir(dir.path())
        .args(["--store", "shared", "init"])
        .assert()
        .success();

    jotter()
        .current_dir(dir.path())
        .args(["--store", "shared", "create", "--title", "Elsewhere"])
        .assert()
        .success();

    assert!(dir.path().join("shared/notes.json").exists());
    assert!(!dir.path().join(".jotter").exists());
}

#[test]
fn test_unknown_format_is_usage_error() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .args(["--format", "records", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_json_usage_error_envelope() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .args(["--format", "json", "update"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_malformed_blob_loads_empty() {
    let dir = setup_store();
    fs::write(dir.path().join(".jotter/notes.json"), "not json at all").unwrap();

    jotter()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes"));

    let id = create_note(&dir, &[]);
    let blob = fs::read_to_string(dir.path().join(".jotter/notes.json")).unwrap();
    assert!(blob.contains(&id));
}

#[test]
fn test_quiet_suppresses_error_message() {
    let dir = tempdir().unwrap();

    jotter()
        .current_dir(dir.path())
        .args(["--quiet", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}
