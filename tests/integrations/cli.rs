//! End-to-end tests for the `clinic-notify` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
log_level = "info"
[transport]
kind = "log"
[transport.simulated]
min_delay_ms = 0
max_delay_ms = 0
"#;

const BOOKING: &str = r#"{
    "kind": "confirmation",
    "recipients": [
        {"name": "Ali", "phone": "+966501234567", "email": "ali@x.com", "role": "patient"},
        {"name": "Dr. Sara", "phone": "+966500000000", "email": "sara@x.com", "role": "doctor"}
    ],
    "payload": {
        "appointmentId": "A1", "confirmationCode": "APT123ABC",
        "patientName": "Ali", "doctorName": "Dr. Sara",
        "date": "Monday, January 20, 2026", "time": "10:00 AM",
        "reason": "Follow-up", "location": "Main Clinic", "language": "en"
    }
}"#;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("clinic-notify").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_dispatches_booking_event() {
    let config = temp_file(CONFIG);
    let event = temp_file(BOOKING);

    command()
        .arg("--config")
        .arg(config.path())
        .arg(event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Notifications sent."))
        .stderr(predicate::str::contains("SMS sent"))
        .stderr(predicate::str::contains("Email sent"))
        .stderr(predicate::str::contains("APT123ABC"));
}

#[test]
fn test_binary_channels_flag_selects_push() {
    let config = temp_file(CONFIG);
    let event = temp_file(BOOKING);

    command()
        .arg("--config")
        .arg(config.path())
        .arg("--channels")
        .arg("push")
        .arg(event.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Push notification sent"))
        .stderr(predicate::str::contains("SMS sent").not());
}

#[test]
fn test_binary_rejects_invalid_payload() {
    let config = temp_file(CONFIG);
    let event = temp_file(&BOOKING.replace("\"APT123ABC\"", "\"\""));

    command()
        .arg("--config")
        .arg(config.path())
        .arg(event.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmationCode"));
}

#[test]
fn test_binary_reports_missing_event_file() {
    command()
        .arg("/nonexistent/event.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read event file"));
}
