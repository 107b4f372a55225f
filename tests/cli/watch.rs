use std::process::{Command as StdCommand, Stdio};
use std::thread;
use std::time::Duration;

use crate::support::{create_note, jotter, setup_store};
use predicates::prelude::*;

#[test]
fn test_watch_stops_after_polls() {
    let dir = setup_store();
    let id = create_note(&dir, &["--title", "Open"]);

    jotter()
        .current_dir(dir.path())
        .args(["watch", "--open", &id, "--polls", "2", "--interval-ms", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Watching"));
}

#[test]
fn test_watch_unknown_open_note() {
    let dir = setup_store();

    jotter()
        .current_dir(dir.path())
        .args(["watch", "--open", "missing", "--polls", "1"])
        .assert()
        .code(3);
}

#[test]
fn test_watch_reports_writes_from_other_instances() {
    let dir = setup_store();
    let id = create_note(&dir, &["--title", "Draft"]);

    let watcher = StdCommand::new(assert_cmd::cargo::cargo_bin!("jotter"))
        .current_dir(dir.path())
        .args(["watch", "--open", &id, "--polls", "150", "--interval-ms", "20"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(500));
    jotter()
        .current_dir(dir.path())
        .args(["update", &id, "--title", "Renamed elsewhere"])
        .assert()
        .success();

    thread::sleep(Duration::from_millis(500));
    jotter()
        .current_dir(dir.path())
        .args(["delete", &id, "--yes"])
        .assert()
        .success();

    let output = watcher.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("refreshed {}: Renamed elsewhere", id),
            format!("closed {}: deleted elsewhere", id),
        ]
    );
}
