//! CLI integration tests for Seminars
//!
//! These tests run the binary against a temporary data directory and
//! verify the full path from record files through the booking rules to
//! the command output. Every time-dependent command is pinned with
//! `--at`, so nothing depends on the wall clock.

use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NOW: i64 = 1_900_000_000;
const DAY: i64 = 86_400;

/// Get a command instance for the seminars binary
fn seminars_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("seminars"))
}

/// `--at` arguments pinning the evaluation moment
fn at(now: i64) -> [String; 2] {
    ["--at".to_string(), now.to_string()]
}

fn write_lines(path: &Path, records: &[serde_json::Value]) {
    let content: String = records
        .iter()
        .map(|record| format!("{}\n", record))
        .collect();
    fs::write(path, content).unwrap();
}

/// Create a data directory with a small event catalog
fn setup_data() -> TempDir {
    let dir = TempDir::new().unwrap();

    write_lines(
        &dir.path().join("events.jsonl"),
        &[
            json!({
                "id": 1,
                "kind": "single_event",
                "title": "Rust Intro",
                "needs_registration": true,
                "max_attendees": 10,
                "price_regular": 5000,
                "price_early_bird": 4000,
                "early_bird_deadline": NOW + 10,
                "schedule": {"begin": NOW + 45},
            }),
            json!({
                "id": 2,
                "kind": "single_event",
                "title": "Sold Out Workshop",
                "needs_registration": true,
                "max_attendees": 2,
                "schedule": {"begin": NOW + 45},
            }),
            json!({
                "id": 3,
                "kind": "single_event",
                "title": "Queued Workshop",
                "needs_registration": true,
                "max_attendees": 2,
                "has_registration_queue": true,
                "schedule": {"begin": NOW + 45},
            }),
            json!({
                "id": 10,
                "kind": "topic",
                "title": "Basics",
            }),
            json!({
                "id": 11,
                "kind": "topic",
                "title": "Advanced",
                "requirements": [10],
            }),
            json!({
                "id": 12,
                "kind": "date",
                "title": "Advanced in May",
                "topic_ref": 11,
                "needs_registration": true,
                "schedule": {"begin": NOW + 7 * DAY},
            }),
            json!({
                "id": 20,
                "kind": "single_event",
                "title": "Announced Later",
                "needs_registration": true,
            }),
        ],
    );

    write_lines(
        &dir.path().join("registrations.jsonl"),
        &[
            json!({"id": 1, "event_id": 2, "seats": 2, "attendee": "alice"}),
            json!({"id": 2, "event_id": 3, "seats": 2}),
        ],
    );

    dir
}

fn in_dir(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = seminars_cmd();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

// =============================================================================
// Listing and status
// =============================================================================

#[test]
fn test_list_shows_all_events() {
    let dir = setup_data();

    in_dir(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Intro"))
        .stdout(predicate::str::contains("Advanced in May"))
        .stdout(predicate::str::contains("full"));
}

#[test]
fn test_status_of_an_open_event() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "1"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration:\topen"));
}

#[test]
fn test_status_of_a_full_event_without_queue() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "2"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("no vacancies"))
        .stdout(predicate::str::contains("Vacancies:\tfull"));
}

#[test]
fn test_registration_queue_keeps_a_full_event_open() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "3"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration:\topen"));
}

#[test]
fn test_status_as_json() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["--format", "json", "status", "2"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"can_register\":false"))
        .stdout(predicate::str::contains("\"message\":\"no vacancies\""));
}

#[test]
fn test_early_bird_price_expires() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "1"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Price:\t40.00"));

    in_dir(&dir)
        .args(["status", "1"])
        .args(at(NOW + 10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Price:\t50.00"));
}

#[test]
fn test_date_event_shows_the_topic_title() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "12"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:\tAdvanced"));
}

#[test]
fn test_dateless_event_is_refused_by_default() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "20"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("no date"));
}

#[test]
fn test_dateless_registration_can_be_enabled_in_the_config() {
    let dir = setup_data();
    fs::write(
        dir.path().join("seminars.toml"),
        "[registration]\nallow_registration_for_events_without_date = true\n",
    )
    .unwrap();

    in_dir(&dir)
        .args(["status", "20"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration:\topen"));
}

#[test]
fn test_unknown_event_fails() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["status", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown event: 999"));
}

// =============================================================================
// Deadlines
// =============================================================================

#[test]
fn test_deadlines_fall_back_to_the_begin_date() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["deadlines", "1"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration until:"))
        // no explicit deadline and no configured offset
        .stdout(predicate::str::contains("Unregistration until:\t-"))
        .stdout(predicate::str::contains("Unregistration possible:\tno"));
}

#[test]
fn test_configured_unregistration_offset() {
    let dir = setup_data();
    fs::write(
        dir.path().join("seminars.toml"),
        "[registration]\nunregistration_deadline_days_before_begin_date = 1\n",
    )
    .unwrap();

    // a week before the event the window is still open
    in_dir(&dir)
        .args(["deadlines", "12"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unregistration possible:\tyes"));

    // half a day before the begin date it has closed
    in_dir(&dir)
        .args(["deadlines", "12"])
        .args(at(NOW + 7 * DAY - 12 * 3_600))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unregistration possible:\tno"));
}

// =============================================================================
// Requirements
// =============================================================================

#[test]
fn test_requirements_of_a_date_follow_its_topic() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["requirements", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basics"));
}

#[test]
fn test_dependents_of_a_required_topic() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["requirements", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Advanced"));
}

// =============================================================================
// Registering
// =============================================================================

#[test]
fn test_register_appends_to_the_store() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["register", "1", "--seats", "2", "--attendee", "bob"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered 2 seat(s) for event 1"));

    let stored = fs::read_to_string(dir.path().join("registrations.jsonl")).unwrap();
    assert!(stored.contains("bob"));
}

#[test]
fn test_register_is_refused_on_a_full_event() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["register", "2"])
        .args(at(NOW))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no vacancies"));
}

#[test]
fn test_register_overflows_to_the_waiting_list() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["register", "3"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("waiting list"));
}

#[test]
fn test_repeat_registration_is_refused() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["register", "1", "--attendee", "bob"])
        .args(at(NOW))
        .assert()
        .success();

    in_dir(&dir)
        .args(["register", "1", "--attendee", "bob"])
        .args(at(NOW))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}

// =============================================================================
// Status changes
// =============================================================================

#[test]
fn test_cancel_writes_back_and_blocks_registration() {
    let dir = setup_data();

    in_dir(&dir)
        .args(["cancel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event 1 is now canceled"));

    let stored = fs::read_to_string(dir.path().join("events.jsonl")).unwrap();
    assert!(stored.contains("\"status\":\"canceled\""));

    in_dir(&dir)
        .args(["status", "1"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("event canceled"));
}

#[test]
fn test_confirm_after_cancel() {
    let dir = setup_data();

    in_dir(&dir).args(["cancel", "1"]).assert().success();
    in_dir(&dir)
        .args(["confirm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event 1 is now confirmed"));

    in_dir(&dir)
        .args(["status", "1"])
        .args(at(NOW))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration:\topen"));
}

#[test]
fn test_empty_data_directory_lists_nothing() {
    let dir = TempDir::new().unwrap();

    in_dir(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID\tKIND"));
}
