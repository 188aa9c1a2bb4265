//! Integration tests for the moodlog binary

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::moodlog_cmd;

fn init_journal() -> TempDir {
    let temp = TempDir::new().unwrap();
    moodlog_cmd().arg("init").arg(temp.path()).assert().success();
    temp
}

fn log(temp: &TempDir, mood: &str, date: &str) {
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["log", mood, "--date", date])
        .assert()
        .success();
}

#[test]
fn test_init_creates_config() {
    let temp = init_journal();

    let content = fs::read_to_string(temp.path().join(".moodlog/config.toml")).unwrap();
    assert!(content.contains("week_start = \"sunday\""));
    assert!(content.contains("theme = \"dark\""));
}

#[test]
fn test_init_with_monday_week_start() {
    let temp = TempDir::new().unwrap();
    moodlog_cmd()
        .arg("init")
        .arg(temp.path())
        .args(["--week-start", "monday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week starts on monday"));

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["config", "week_start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monday"));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = init_journal();
    moodlog_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_commands_outside_journal_fail() {
    let temp = TempDir::new().unwrap();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["show", "2025-01-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("moodlog init"));
}

#[test]
fn test_log_and_show() {
    let temp = init_journal();

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["log", "4", "--date", "2024-02-10", "--note", "sunny walk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 2024-02-10  4 (Happy)  sunny walk"));

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["show", "2024-02-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-10  4 (Happy)  sunny walk"));

    assert!(temp.path().join(".moodlog/entries.toml").exists());
}

#[test]
fn test_log_invalid_mood_rejected() {
    let temp = init_journal();

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["log", "7", "--date", "2024-02-10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Very Happy"));

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_every_bad_mood_is_a_validation_error() {
    let temp = init_journal();

    for bad in ["0", "6", "300", "-1", "happy"] {
        moodlog_cmd()
            .current_dir(temp.path())
            .args(["log", bad, "--date", "2024-02-10"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Mood levels"));
    }
}

#[test]
fn test_relog_overwrites() {
    let temp = init_journal();
    log(&temp, "2", "2024-03-01");
    log(&temp, "5", "2024-03-01");

    let output = moodlog_cmd()
        .current_dir(temp.path())
        .arg("list")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["2024-03-01  5 (Very Happy)"]);
}

#[test]
fn test_delete_then_show() {
    let temp = init_journal();
    log(&temp, "3", "2024-03-01");

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["delete", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry for 2024-03-01"));

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["delete", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry for 2024-03-01"));
}

#[test]
fn test_list_range_sorted_oldest_first() {
    let temp = init_journal();
    log(&temp, "3", "2025-01-20");
    log(&temp, "1", "2025-01-10");
    log(&temp, "5", "2025-01-15");
    log(&temp, "2", "2025-02-01");

    let output = moodlog_cmd()
        .current_dir(temp.path())
        .args(["list", "--from", "2025-01-01", "--to", "2025-01-31"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("2025-01-10"));
    assert!(lines[1].starts_with("2025-01-15"));
    assert!(lines[2].starts_with("2025-01-20"));
}

#[test]
fn test_list_reversed_range_fails() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["list", "--from", "2025-02-01", "--to", "2025-01-01"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid range"));
}

#[test]
fn test_calendar_marks_entries_and_selection() {
    let temp = init_journal();
    log(&temp, "4", "2024-02-10");

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["calendar", "--year", "2024", "--month", "2", "--select", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("February 2024"))
        .stdout(predicate::str::contains("[10*]"))
        .stdout(predicate::str::contains(" 29"))
        .stdout(predicate::str::contains("2024-02-10  4 (Happy)"));
}

#[test]
fn test_calendar_navigation_wraps_year() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["calendar", "--year", "2024", "--month", "12", "--next", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2025"));
}

#[test]
fn test_calendar_select_out_of_range() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["calendar", "--year", "2024", "--month", "4", "--select", "31"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Out of range"));
}

#[test]
fn test_stats_week() {
    let temp = init_journal();
    log(&temp, "5", "2025-01-13");
    log(&temp, "3", "2025-01-15");

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["stats", "week", "--date", "2025-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week 2025-01-12 to 2025-01-18"))
        .stdout(predicate::str::contains("Average mood: 4.00 (Happy)"))
        .stdout(predicate::str::contains("Change: n/a"))
        .stdout(predicate::str::contains("Trend:"))
        .stdout(predicate::str::contains("Mon"));
}

#[test]
fn test_calendar_navigation_past_last_year_fails() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["calendar", "--year", "2147483647", "--month", "12", "--next", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Out of range"));
}

#[test]
fn test_stats_at_earliest_date_does_not_crash() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["stats", "day", "--date=-262143-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Change: n/a"));
}

#[test]
fn test_stats_invalid_period() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["stats", "year"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period"));
}

#[test]
fn test_theme_switch_persists() {
    let temp = init_journal();

    moodlog_cmd()
        .current_dir(temp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["theme", "midnight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to midnight"));

    moodlog_cmd()
        .current_dir(temp.path())
        .args(["config", "theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("midnight"));
}

#[test]
fn test_theme_unknown_rejected() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["theme", "sepia"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("dark, midnight"));
}

#[test]
fn test_config_list() {
    let temp = init_journal();
    moodlog_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week_start = sunday"))
        .stdout(predicate::str::contains("theme = dark"))
        .stdout(predicate::str::contains("created = "));
}

#[test]
fn test_corrupt_entry_reported_and_skipped() {
    let temp = init_journal();
    fs::write(
        temp.path().join(".moodlog/entries.toml"),
        r#"
["2025-03-01"]
moodLevel = 4
createdAt = "2025-03-01T10:00:00Z"
updatedAt = "2025-03-01T10:00:00Z"

["2025-03-02"]
moodLevel = 12
createdAt = "2025-03-02T10:00:00Z"
updatedAt = "2025-03-02T10:00:00Z"
"#,
    )
    .unwrap();

    moodlog_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-01  4 (Happy)"))
        .stderr(predicate::str::contains(
            "Warning: skipped corrupt entry '2025-03-02'",
        ));
}

#[test]
fn test_moodlog_root_env() {
    let temp = init_journal();
    let elsewhere = TempDir::new().unwrap();

    moodlog_cmd()
        .current_dir(elsewhere.path())
        .env("MOODLOG_ROOT", temp.path())
        .args(["log", "2", "--date", "2025-06-01"])
        .assert()
        .success();

    assert!(temp.path().join(".moodlog/entries.toml").exists());
}
