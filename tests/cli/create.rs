use crate::support::{create_note, jotter, setup_store, stdout_json};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    jotter()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized jotter store"));

    let config = fs::read_to_string(dir.path().join(".jotter/config.toml")).unwrap();
    assert!(config.contains("storage_key = \"notes\""));
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_create_prints_id_and_persists() {
    let dir = setup_store();

    let id = create_note(&dir, &[]);
    assert_eq!(id.len(), 8, "unexpected id {id:?}");
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let blob = fs::read_to_string(dir.path().join(".jotter/notes.json")).unwrap();
    let notes: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(notes[&id]["title"], "Untitled");
    assert_eq!(notes[&id]["content"], "");
}

#[test]
fn test_create_with_fields() {
    let dir = setup_store();

    let id = create_note(&dir, &["--title", "Groceries", "--content", "<p>milk</p>"]);
    let note = stdout_json(&dir, &["--format", "json", "show", &id]);
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["content"], "<p>milk</p>");
}

#[test]
fn test_create_json_output() {
    let dir = setup_store();

    let created = stdout_json(&dir, &["--format", "json", "create", "--title", "Plan"]);
    assert_eq!(created["title"], "Plan");
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(created["timestamp"].as_i64().is_some());
}

#[test]
fn test_create_ids_are_distinct() {
    let dir = setup_store();

    let first = create_note(&dir, &[]);
    let second = create_note(&dir, &[]);
    assert_ne!(first, second);
}
