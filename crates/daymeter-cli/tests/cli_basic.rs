//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They run
//! against the dev data directory (DAYMETER_ENV=dev) and stick to commands
//! that do not mutate configuration, so outputs stay deterministic.

use std::path::PathBuf;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "daymeter-cli", "--"])
        .args(args)
        .env("DAYMETER_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Write a JSON events file into the temp directory.
fn write_events_file(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("daymeter-cli-test-{name}.json"));
    std::fs::write(&path, json).expect("write events file");
    path
}

const SINGLE_EVENT: &str = r#"[
    {
        "id": "evt-1",
        "title": "Standup",
        "start": "2026-03-02T09:00:00Z",
        "end": "2026-03-02T09:15:00Z"
    }
]"#;

#[test]
fn test_score_with_base_override() {
    let (stdout, stderr, code) = run_cli(&[
        "score",
        "Standup",
        "2026-03-02T09:00:00Z",
        "2026-03-02T09:15:00Z",
        "--base",
        "1",
    ]);
    assert_eq!(code, 0, "score failed: {stderr}");

    let result: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(result["base"], 1);
    assert_eq!(result["total"], 1, "no work ranges configured, no bonus");
}

#[test]
fn test_score_zero_base_short_circuits() {
    let (stdout, stderr, code) = run_cli(&[
        "score",
        "Unknown Event",
        "2026-03-02T09:00:00Z",
        "2026-03-02T10:00:00Z",
    ]);
    assert_eq!(code, 0, "score failed: {stderr}");

    let result: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(result["total"], 0);
    assert_eq!(result["reasons"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_day_report_json() {
    let events = write_events_file("day", SINGLE_EVENT);
    let (stdout, stderr, code) = run_cli(&[
        "day",
        "2026-03-02",
        "--events",
        events.to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(code, 0, "day failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(report["status"], "healthy");
    assert_eq!(report["breakdown"]["total_score"], 0.0);
}

#[test]
fn test_zones_with_no_work_ranges() {
    let events = write_events_file("zones", SINGLE_EVENT);
    let (stdout, stderr, code) =
        run_cli(&["zones", "--events", events.to_str().unwrap()]);
    assert_eq!(code, 0, "zones failed: {stderr}");
    assert!(stdout.contains("focus ranges: 0"));
    assert!(stdout.contains("free time zones: 0"));
}

#[test]
fn test_suggest_without_configured_range() {
    let events = write_events_file("suggest", SINGLE_EVENT);
    let (stdout, stderr, code) = run_cli(&[
        "suggest",
        "Lunch",
        "2026-03-02",
        "--events",
        events.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "suggest failed: {stderr}");
    assert!(stdout.contains("no suggestion"));
}

#[test]
fn test_config_path_prints_a_path() {
    let (stdout, stderr, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed: {stderr}");
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_missing_events_file_fails_cleanly() {
    let (_stdout, stderr, code) = run_cli(&[
        "day",
        "2026-03-02",
        "--events",
        "/nonexistent/daymeter-events.json",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}
