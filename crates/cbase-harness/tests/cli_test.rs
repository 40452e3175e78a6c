//! End-to-end tests for the `cbase` binary.

use std::process::Command;

use cbase_harness::{LogEntry, LogLevel, Outcome};

fn cbase(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cbase"))
        .args(args)
        .env("TZ", "UTC")
        .env_remove("CBASE_MODE")
        .output()
        .expect("cbase should execute")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn format_renders_template() {
    let out = cbase(&["format", "%s=%5d|%.2f", "n", "42", "2.5"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "n=   42|2.50\n");
}

#[test]
fn format_truncation_fails() {
    let out = cbase(&["format", "--capacity", "5", "%d", "12345"]);
    assert!(!out.status.success());
    let out = cbase(&["format", "--capacity", "6", "%d", "12345"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "12345\n");
}

#[test]
fn strerror_unknown_code_is_synthesized() {
    let out = cbase(&["strerror", "9999"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.trim_end().ends_with("9999"), "{text:?}");
}

#[test]
fn strerror_tiny_capacity_falls_back() {
    let out = cbase(&["strerror", "2", "--capacity", "4"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "unknown error\n");
}

#[test]
fn timestamp_at_fixed_epoch() {
    let out = cbase(&["timestamp", "--epoch", "1581945725"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Mon Feb 17 13:22:05 2020\n");
}

#[test]
fn timestamp_small_capacity_prints_error() {
    let out = cbase(&["timestamp", "--epoch", "0", "--capacity", "24"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "error\n");
}

#[test]
fn json_output_is_one_log_entry() {
    let out = cbase(&["--json", "timestamp", "--epoch", "0"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 1);
    let entry: LogEntry = serde_json::from_str(text.trim_end()).expect("valid LogEntry");
    assert_eq!(entry.event, "timestamp");
    assert_eq!(entry.level, LogLevel::Info);
    assert_eq!(entry.outcome, Some(Outcome::Ok));
    assert_eq!(entry.mode.as_deref(), Some("strict"));
    let details = entry.details.expect("details");
    assert_eq!(details["text"], "Thu Jan  1 00:00:00 1970");
    assert!(entry.trace_id.starts_with("cbase::timestamp::"));
}

#[test]
fn json_records_truncation() {
    let out = cbase(&["format", "--json", "--capacity", "3", "%s", "long"]);
    assert!(out.status.success());
    let entry: LogEntry = serde_json::from_str(stdout(&out).trim_end()).unwrap();
    assert_eq!(entry.outcome, Some(Outcome::Truncated));
    assert_eq!(entry.level, LogLevel::Warn);
    assert_eq!(entry.details.unwrap()["return"], -1);
}

#[test]
fn json_strerror_carries_errno() {
    let out = cbase(&["strerror", "--json", "22"]);
    let entry: LogEntry = serde_json::from_str(stdout(&out).trim_end()).unwrap();
    assert_eq!(entry.errno, Some(22));
    assert_eq!(entry.symbol.as_deref(), Some("describe_error"));
}
