//! Error scenario integration tests

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn elementa_bin(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_elementa"));
    cmd.env("ELEMENTA_DATA_DIR", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    elementa_bin(home)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn write_blank_text_is_rejected() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["write", "   "]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("empty"),
        "Expected error about empty text, got: {}",
        stderr
    );
    assert!(!home.path().join("data/elementa_entries.json").exists());
}

#[test]
fn unknown_element_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["write", "-e", "aether", "hello"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn non_numeric_id_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["show", "not-an-id"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn corrupted_journal_lists_empty_but_refuses_writes() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    let file = data.join("elementa_entries.json");
    std::fs::write(&file, "{ this is not json").unwrap();

    let output = run(home.path(), &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No entries yet"));

    let output = run(home.path(), &["write", "still here"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("corrupted"),
        "Expected corruption error, got: {}",
        stderr
    );

    // the damaged file is left for the user to recover
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "{ this is not json"
    );
}

#[test]
fn malformed_records_are_skipped() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("elementa_entries.json"),
        r#"[{"id":5,"element":"fire","text":"kept"},{"id":6,"element":"inbox","text":"dropped"}]"#,
    )
    .unwrap();

    let output = run(home.path(), &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kept"));
    assert!(!stdout.contains("dropped"));
}

#[test]
fn move_keeps_records_it_cannot_read() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    let file = data.join("elementa_entries.json");
    std::fs::write(
        &file,
        r#"[{"id":5,"element":"fire","text":"kept"},{"id":4,"element":"inbox","text":"foreign"}]"#,
    )
    .unwrap();

    let output = run(home.path(), &["move", "5", "water"]);
    assert!(output.status.success());

    let stored = std::fs::read_to_string(&file).unwrap();
    assert!(stored.contains("\"folder\":\"water\""));
    assert!(stored.contains("\"element\":\"inbox\""));
    assert!(stored.contains("foreign"));
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "get", "unknown_key"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") && stderr.contains("Valid keys"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_element() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "set", "default_element", "aether"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid element"),
        "Expected error about invalid element, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "set", "audio.save", "maybe"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("default_element: (not set)"));
    assert!(stdout.contains("audio.save: (not set)"));
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    assert!(run(home.path(), &["config", "init"]).status.success());

    let output = run(home.path(), &["config", "init"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
}

#[test]
fn missing_script_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["record", "--script", "/nonexistent/script.json"]);
    assert_eq!(output.status.code(), Some(2));
}
