use crate::support::{create_note, jotter, setup_store, stdout_json};
use predicates::prelude::*;

#[test]
fn test_list_empty() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes"));
}

#[test]
fn test_list_human_rows_truncate_titles() {
    let dir = setup_store();
    create_note(&dir, &["--title", "Groceries"]);
    create_note(&dir, &["--title", "Meeting notes for Monday"]);

    let output = jotter()
        .current_dir(dir.path())
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("Groceries - "), "row: {}", rows[0]);
    assert!(rows[1].starts_with("Meeting no... - "), "row: {}", rows[1]);
}

#[test]
fn test_list_json_in_creation_order() {
    let dir = setup_store();
    let first = create_note(&dir, &["--title", "First"]);
    let second = create_note(&dir, &["--title", "Second"]);
    let third = create_note(&dir, &["--title", "Third"]);

    jotter()
        .current_dir(dir.path())
        .args(["update", &first, "--content", "edited last"])
        .assert()
        .success();

    let notes = stdout_json(&dir, &["--format", "json", "list"]);
    let rows = notes.as_array().unwrap();
    let ids: Vec<&str> = rows.iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str(), third.as_str()]);
    assert_eq!(rows[1]["title"], "Second");
    assert!(rows[0].get("content").is_none());
}
