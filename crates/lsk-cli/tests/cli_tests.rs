//! CLI integration tests for lsk-cli
//!
//! Tests command parsing, output formatting, and config handling.

use serde_json::Value;
use std::path::Path;
use std::process::Command;

/// Helper to run the CLI against an isolated config file
fn run_lsk(config: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lsk"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_lsk"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lsk"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("post"));
    assert!(stdout.contains("query"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_lsk"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lsk"));
}

#[test]
fn test_cli_query_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(&dir.path().join("config.toml"), &["query", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("account"));
    assert!(stdout.contains("balance"));
    assert!(stdout.contains("block"));
    assert!(stdout.contains("peers"));
}

// ==================== Config Command Tests ====================

#[test]
fn test_config_show_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = run_lsk(&path, &["config", "--show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hub21.lisk.io"));
    assert!(stdout.contains("log_level = \"warn\""));
    // showing never writes the file
    assert!(!path.exists());
}

#[test]
fn test_config_show_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(&dir.path().join("config.toml"), &["--json", "config", "--show"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["config"]["log_level"], "warn");
    assert_eq!(json["random_peer"], true);
    assert_eq!(json["port"], 8000);
}

#[test]
fn test_config_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = run_lsk(
        &path,
        &["config", "--set-node", "localhost", "--set-testnet", "true"],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration saved"));
    assert!(path.exists());

    let output = run_lsk(&path, &["--json", "config", "--show"]);
    let json = stdout_json(&output);
    assert_eq!(json["config"]["client"]["node"], "localhost");
    assert_eq!(json["config"]["client"]["testnet"], true);
    assert_eq!(json["random_peer"], false);
    assert_eq!(json["port"], 7000);

    let output = run_lsk(&path, &["config", "--clear-node"]);
    assert!(output.status.success());
    let output = run_lsk(&path, &["--json", "config", "--show"]);
    assert_eq!(stdout_json(&output)["random_peer"], true);
}

#[test]
fn test_flags_override_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = run_lsk(&path, &["--json", "--ssl", "config", "--show"]);
    let json = stdout_json(&output);
    assert_eq!(json["config"]["client"]["ssl"], true);
    assert_eq!(json["port"], 443);
    assert!(!path.exists());
}

#[test]
fn test_config_without_flags_prints_hint() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(&dir.path().join("config.toml"), &["config"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--show"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "client = 5").unwrap();

    let output = run_lsk(&path, &["config", "--show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config error"));
}

// ==================== Request Tests ====================

#[test]
fn test_get_rejects_malformed_param() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(&dir.path().join("config.toml"), &["get", "blocks", "noequals"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected key=value"));
}

#[test]
fn test_invalid_port_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(
        &dir.path().join("config.toml"),
        &["--json", "--port", "0", "get", "blocks"],
    );
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("port must not be 0"));
}

#[test]
fn test_unreachable_pinned_node() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(
        &dir.path().join("config.toml"),
        &["--json", "--node", "127.0.0.1", "--port", "1", "get", "blocks"],
    );
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Could not create an HTTP request to any known peers."
    );
}

#[test]
fn test_broadcast_requires_transaction() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_lsk(&dir.path().join("config.toml"), &["tx", "broadcast"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("provide a transaction"));
}
