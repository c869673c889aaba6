//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the labor,
//! offerable and format subcommands through the actual binary, including
//! policy and occupied-slot files, JSON output and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// Reference week: 2026-03-16 (Monday) through 2026-03-22 (Sunday).
const WEDNESDAY: &str = "2026-03-18";
const SATURDAY: &str = "2026-03-21";
const SUNDAY: &str = "2026-03-22";

// ─────────────────────────────────────────────────────────────────────────────
// labor
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn labor_saturday_lists_morning_slots() {
    slots()
        .args(["labor", "--date", SATURDAY])
        .assert()
        .success()
        .stdout("08:00\n08:30\n09:00\n09:30\n10:00\n10:30\n11:00\n11:30\n");
}

#[test]
fn labor_weekday_lists_sixteen_slots() {
    let output = slots()
        .args(["labor", "-d", WEDNESDAY])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "08:00");
    assert_eq!(lines[8], "14:00");
    assert_eq!(lines[15], "17:30");
}

#[test]
fn labor_sunday_prints_nothing() {
    slots()
        .args(["labor", "--date", SUNDAY])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn labor_twelve_hour_display() {
    slots()
        .args(["labor", "--date", SATURDAY, "--twelve-hour"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("8:00 AM\n8:30 AM\n"))
        .stdout(predicate::str::ends_with("11:30 AM\n"));
}

#[test]
fn labor_json_is_array_of_strings() {
    let output = slots()
        .args(["labor", "--date", SATURDAY, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 8);
    assert_eq!(value[0], "08:00");
}

#[test]
fn labor_accepts_local_midnight_date() {
    slots()
        .args(["labor", "--date", "2026-03-21T00:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("08:00\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// offerable
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn offerable_excludes_inline_bookings() {
    let output = slots()
        .args(["offerable", "--date", WEDNESDAY, "--occupied", "08:00, 14:00"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 14);
    assert_eq!(lines[0], "08:30");
    assert!(!lines.contains(&"08:00"));
    assert!(!lines.contains(&"14:00"));
}

#[test]
fn offerable_without_bookings_equals_labor() {
    slots()
        .args(["offerable", "--date", SATURDAY])
        .assert()
        .success()
        .stdout("08:00\n08:30\n09:00\n09:30\n10:00\n10:30\n11:00\n11:30\n");
}

#[test]
fn offerable_sunday_is_empty_regardless_of_bookings() {
    slots()
        .args(["offerable", "--date", SUNDAY, "--occupied", "08:00"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn offerable_reads_occupied_file_and_merges_inline() {
    let output = slots()
        .args([
            "offerable",
            "--date",
            WEDNESDAY,
            "--occupied-file",
            &fixture("booked.json"),
            "--occupied",
            "17:30",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // 16 labor slots minus 08:00, 08:30, 14:00 and 17:30; 19:00 is ignored.
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "09:00");
    assert_eq!(lines[lines.len() - 1], "17:00");
}

#[test]
fn offerable_json_reports_day_schedule() {
    let output = slots()
        .args([
            "offerable",
            "--date",
            WEDNESDAY,
            "--occupied-file",
            &fixture("booked.json"),
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let schedule: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(schedule["date"], WEDNESDAY);
    assert_eq!(schedule["weekday"], "Wednesday");
    assert_eq!(schedule["labor"].as_array().unwrap().len(), 16);
    assert_eq!(schedule["offerable"].as_array().unwrap().len(), 13);
    assert_eq!(schedule["occupied_ignored"], serde_json::json!(["19:00"]));
}

#[test]
fn offerable_with_custom_policy() {
    // 2026-03-17 is a Tuesday: 09:00-11:00 under the part-time policy.
    slots()
        .args([
            "offerable",
            "--date",
            "2026-03-17",
            "--policy",
            &fixture("part_time_policy.json"),
            "--occupied",
            "09:30",
        ])
        .assert()
        .success()
        .stdout("09:00\n10:00\n10:30\n");
}

#[test]
fn custom_policy_closes_unlisted_days() {
    slots()
        .args([
            "labor",
            "--date",
            WEDNESDAY,
            "--policy",
            &fixture("part_time_policy.json"),
        ])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn verbose_logs_to_stderr_only() {
    slots()
        .args(["-v", "offerable", "--date", SATURDAY])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("08:00\n"))
        .stderr(predicate::str::contains("computed offerable slots"));
}

// ─────────────────────────────────────────────────────────────────────────────
// format
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_converts_to_twelve_hour() {
    for (input, expected) in [
        ("00:00", "12:00 AM\n"),
        ("08:00", "8:00 AM\n"),
        ("12:00", "12:00 PM\n"),
        ("13:30", "1:30 PM\n"),
        ("23:30", "11:30 PM\n"),
    ] {
        slots()
            .args(["format", input])
            .assert()
            .success()
            .stdout(expected);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_date_fails() {
    slots()
        .args(["labor", "--date", "2026-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn unpadded_date_fails() {
    slots()
        .args(["labor", "--date", "2026-3-8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero-padded"));
}

#[test]
fn off_grid_slot_fails() {
    slots()
        .args(["format", "08:15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time slot"));
}

#[test]
fn off_grid_occupied_fails() {
    slots()
        .args(["offerable", "--date", WEDNESDAY, "--occupied", "08:00,9:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse occupied slots"));
}

#[test]
fn overlapping_policy_fails() {
    slots()
        .args([
            "labor",
            "--date",
            WEDNESDAY,
            "--policy",
            &fixture("overlapping_policy.json"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load policy"));
}

#[test]
fn missing_policy_file_fails() {
    slots()
        .args(["labor", "--date", WEDNESDAY, "--policy", "/nonexistent/policy.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read policy file"));
}

#[test]
fn occupied_file_must_be_an_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booked.json");
    std::fs::write(&path, r#"{"slots": ["08:00"]}"#).unwrap();

    slots()
        .args([
            "offerable",
            "--date",
            WEDNESDAY,
            "--occupied-file",
            path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected a JSON array of slots"));
}

#[test]
fn json_and_twelve_hour_conflict() {
    slots()
        .args(["labor", "--date", SATURDAY, "--json", "--twelve-hour"])
        .assert()
        .failure();
}

#[test]
fn missing_subcommand_fails() {
    slots().assert().failure();
}
