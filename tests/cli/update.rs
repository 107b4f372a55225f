use crate::support::{create_note, jotter, setup_store, stdout_json};
use predicates::prelude::*;

#[test]
fn test_update_title_keeps_content() {
    let dir = setup_store();
    let id = create_note(&dir, &["--content", "body"]);

    jotter()
        .current_dir(dir.path())
        .args(["update", &id, "--title", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated {}", id)));

    let note = stdout_json(&dir, &["--format", "json", "show", &id]);
    assert_eq!(note["title"], "Renamed");
    assert_eq!(note["content"], "body");
}

#[test]
fn test_update_without_fields_changes_nothing() {
    let dir = setup_store();
    let id = create_note(&dir, &["--title", "Same"]);
    let before = stdout_json(&dir, &["--format", "json", "show", &id]);

    let result = stdout_json(&dir, &["--format", "json", "update", &id]);
    assert_eq!(result["changed"], false);

    let after = stdout_json(&dir, &["--format", "json", "show", &id]);
    assert_eq!(before, after);
}

#[test]
fn test_update_unknown_note() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .args(["update", "nope", "--title", "x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("note not found: nope"));
}
