//! Integration tests for the `unconf` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the subcommands against the
//! fixture snapshot (Berlin display time, booking window 09:00-11:00, Keynote
//! in the main hall 09:00-10:00).

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn snapshot_path() -> String {
    fixture("snapshot.json")
}

/// A command with a pinned timezone so no user config is picked up.
fn unconf() -> Command {
    let mut cmd = Command::cargo_bin("unconf").unwrap();
    cmd.args(["--timezone", "Europe/Berlin"]);
    cmd.env_remove("UNCONF_LOG").env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// slots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_at_booked_venue() {
    unconf()
        .args(["slots", "-s", &snapshot_path(), "--day", "sat", "--venue", "hall"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00  unavailable"))
        .stdout(predicate::str::contains("09:30  unavailable"))
        .stdout(predicate::str::contains("10:00  available    up to 60 min"))
        .stdout(predicate::str::contains("10:30  available    up to 30 min"));
}

#[test]
fn slots_json_from_stdin() {
    let snapshot = std::fs::read_to_string(snapshot_path()).unwrap();

    let output = unconf()
        .args(["--json", "slots", "--day", "sat", "--venue", "hall"])
        .write_stdin(snapshot)
        .output()
        .unwrap();

    assert!(output.status.success());
    let slots: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0]["available"], false);
    assert_eq!(slots[0]["max_duration_minutes"], 0);
    assert_eq!(slots[2]["label"], "10:00");
    assert_eq!(slots[2]["max_duration_minutes"], 60);
}

#[test]
fn slots_without_venue_offer_three_hours() {
    unconf()
        .args(["slots", "-s", &snapshot_path(), "--day", "sat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00  available    up to 180 min"))
        .stdout(predicate::str::contains("unavailable").not());
}

#[test]
fn slots_unknown_day_fails() {
    unconf()
        .args(["slots", "-s", &snapshot_path(), "--day", "sun"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown day: sun"));
}

// ─────────────────────────────────────────────────────────────────────────────
// clashes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn clashes_reports_hosting_clash() {
    unconf()
        .args([
            "clashes", "-s", &snapshot_path(), "--day", "sat", "--start", "09:30",
            "--duration", "60", "--host", "alice",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Alice is hosting Keynote from 09:00 to 10:00\n",
        ));
}

#[test]
fn clashes_reports_attending_clash() {
    unconf()
        .args([
            "clashes", "-s", &snapshot_path(), "--day", "sat", "--start", "10:00",
            "--duration", "30", "--host", "alice", "--host", "bob",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Bob is attending Garden chat from 09:30 to 10:30\n",
        ));
}

#[test]
fn clashes_none() {
    unconf()
        .args([
            "clashes", "-s", &snapshot_path(), "--day", "sat", "--start", "10:30",
            "--duration", "30", "--host", "alice",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clashes"));
}

#[test]
fn clashes_rejects_bad_start() {
    unconf()
        .args([
            "clashes", "-s", &snapshot_path(), "--day", "sat", "--start", "nine",
            "--duration", "30", "--host", "alice",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected HH:mm"));
}

// ─────────────────────────────────────────────────────────────────────────────
// phase / next-vote
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn phase_follows_windows() {
    unconf()
        .args([
            "phase", "-s", &snapshot_path(), "--event", "fest", "--now",
            "2026-05-02T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout("proposal\n");

    unconf()
        .args([
            "phase", "-s", &snapshot_path(), "--event", "fest", "--now",
            "2026-05-12T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout("voting\n");
}

#[test]
fn phase_without_windows_is_scheduling() {
    unconf()
        .args([
            "phase", "-s", &snapshot_path(), "--event", "legacy", "--now",
            "2020-01-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout("scheduling\n");
}

#[test]
fn next_vote_picks_least_voted() {
    unconf()
        .args(["next-vote", "-s", &snapshot_path(), "--guest", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p1  Rust for beginners"));

    unconf()
        .args(["next-vote", "-s", &snapshot_path(), "--guest", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing left to vote on"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_accepts_free_slot_and_warns_on_clash() {
    unconf()
        .args(["check", "-s", &snapshot_path(), "--draft", &fixture("draft_ok.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: Lightning talks from 10:00 to 11:00"))
        .stderr(predicate::str::contains(
            "warning: Bob is attending Garden chat from 09:30 to 10:30",
        ));
}

#[test]
fn check_rejects_venue_overlap() {
    unconf()
        .args([
            "check", "-s", &snapshot_path(), "--draft", &fixture("draft_conflict.json"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Draft rejected"))
        .stderr(predicate::str::contains(
            "Venue is already booked by 'Keynote' from 09:00 to 10:00",
        ));
}

#[test]
fn check_rejects_frozen_session() {
    let dir = tempfile::tempdir().unwrap();
    let draft = dir.path().join("edit.json");
    std::fs::write(
        &draft,
        r#"{"id":"keynote","title":"Keynote","hosts":["alice"],"venue":"hall",
            "day":"sat","start_time":"10:00","duration_minutes":30}"#,
    )
    .unwrap();

    unconf()
        .args(["check", "-s", &snapshot_path(), "--draft", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session keynote is not editable"));
}

#[test]
fn check_skips_clash_report_for_unknown_host() {
    let dir = tempfile::tempdir().unwrap();
    let draft = dir.path().join("guest_host.json");
    std::fs::write(
        &draft,
        r#"{"title":"Lightning talks","hosts":["bob","zed"],"venue":"hall",
            "day":"sat","start_time":"10:00","duration_minutes":60}"#,
    )
    .unwrap();

    unconf()
        .args(["check", "-s", &snapshot_path(), "--draft", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: Lightning talks from 10:00 to 11:00"))
        .stderr(predicate::str::contains(
            "warning: Bob is attending Garden chat from 09:30 to 10:30",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_file_sets_display_timezone() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[engine]\ndisplay_timezone = \"UTC\"\n").unwrap();

    Command::cargo_bin("unconf")
        .unwrap()
        .args([
            "--config", config.to_str().unwrap(), "slots", "-s", &snapshot_path(),
            "--day", "sat",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("08:00"));
}

#[test]
fn invalid_timezone_fails() {
    Command::cargo_bin("unconf")
        .unwrap()
        .args(["--timezone", "Mars/Olympus", "slots", "-s", &snapshot_path(), "--day", "sat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone: Mars/Olympus"));
}
