use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::process::Output;
use tempfile::TempDir;

/// Get a Command for jotter
pub fn jotter() -> Command {
    cargo_bin_cmd!("jotter")
}

/// Create a temp directory holding an initialized store
pub fn setup_store() -> TempDir {
    let dir = TempDir::new().unwrap();
    jotter()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// First stdout line of a command, i.e. the id printed by `create`
pub fn extract_id(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Run `create` with extra args and return the new id
pub fn create_note(dir: &TempDir, args: &[&str]) -> String {
    let output = jotter()
        .current_dir(dir.path())
        .arg("create")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {:?}", output);
    extract_id(&output)
}

/// Parse the stdout of a successful command as JSON
pub fn stdout_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = jotter()
        .current_dir(dir.path())
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}
