use crate::support::{create_note, jotter, setup_store, stdout_json};
use predicates::prelude::*;

#[test]
fn test_delete_with_yes() {
    let dir = setup_store();
    let keep = create_note(&dir, &["--title", "Keep"]);
    let gone = create_note(&dir, &["--title", "Gone"]);

    jotter()
        .current_dir(dir.path())
        .args(["delete", &gone, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {}", gone)));

    let notes = stdout_json(&dir, &["--format", "json", "list"]);
    let ids: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![keep.as_str()]);
}

#[test]
fn test_delete_prompts_for_confirmation() {
    let dir = setup_store();
    let id = create_note(&dir, &[]);

    jotter()
        .current_dir(dir.path())
        .args(["delete", &id])
        .write_stdin("y\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Are you sure you want to delete this note?",
        ));

    let notes = stdout_json(&dir, &["--format", "json", "list"]);
    assert!(notes.as_array().unwrap().is_empty());
}

#[test]
fn test_delete_declined_keeps_note() {
    let dir = setup_store();
    let id = create_note(&dir, &[]);

    jotter()
        .current_dir(dir.path())
        .args(["delete", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    jotter()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success();
}

#[test]
fn test_delete_is_idempotent() {
    let dir = setup_store();
    let id = create_note(&dir, &[]);

    for _ in 0..2 {
        jotter()
            .current_dir(dir.path())
            .args(["delete", &id, "--yes"])
            .assert()
            .success();
    }

    let result = stdout_json(&dir, &["--format", "json", "delete", &id]);
    assert_eq!(result["deleted"], false);
}
