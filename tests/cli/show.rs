use crate::support::{create_note, jotter, setup_store};
use predicates::prelude::*;

#[test]
fn test_show_human() {
    let dir = setup_store();
    let id = create_note(&dir, &["--title", "Recipe", "--content", "<p>flour</p>"]);

    jotter()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Recipe\n"))
        .stdout(predicate::str::contains("<p>flour</p>"));
}

#[test]
fn test_show_empty_title_falls_back() {
    let dir = setup_store();
    let id = create_note(&dir, &["--title", ""]);

    jotter()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Untitled\n"));
}

#[test]
fn test_show_unknown_note_json_error() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .args(["--format", "json", "show", "missing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"note_not_found\""));
}
