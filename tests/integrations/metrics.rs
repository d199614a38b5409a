//! Integration tests for the per-channel delivery counters.

use clinic_notify::{
    notification::test_utils::RecordingTransport, AppointmentNotificationPayload, Channel,
    Language, NotificationDispatcher, Recipient, Role,
};
use serial_test::serial;
use std::sync::Arc;

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::test_metrics::TestMetrics;

const SENT: &str = "notifications_sent_total";
const FAILED: &str = "notifications_failed_total";

fn recipients() -> Vec<Recipient> {
    vec![
        Recipient {
            name: "Ali".to_string(),
            phone: Some("+966501234567".to_string()),
            email: Some("ali@x.com".to_string()),
            role: Role::Patient,
        },
        Recipient {
            name: "Dr. Sara".to_string(),
            phone: Some("+966500000000".to_string()),
            email: Some("sara@x.com".to_string()),
            role: Role::Doctor,
        },
    ]
}

fn payload() -> AppointmentNotificationPayload {
    AppointmentNotificationPayload {
        appointment_id: "A1".to_string(),
        confirmation_code: "APT123ABC".to_string(),
        patient_name: "Ali".to_string(),
        doctor_name: "Dr. Sara".to_string(),
        date: "Monday, January 20, 2026".to_string(),
        time: "10:00 AM".to_string(),
        reason: "Follow-up".to_string(),
        location: "Main Clinic".to_string(),
        language: Language::En,
    }
}

#[tokio::test]
#[serial]
async fn test_successful_sends_are_counted_per_channel() {
    let metrics = TestMetrics::global();
    let sent_before = metrics.get_counter(SENT);
    let sms_before = metrics.get_channel_counter(SENT, "sms");
    let email_before = metrics.get_channel_counter(SENT, "email");
    let failed_before = metrics.get_counter(FAILED);

    let dispatcher = NotificationDispatcher::new(Arc::new(RecordingTransport::new()));
    dispatcher
        .dispatch(&recipients(), &payload(), &Channel::DEFAULT)
        .await
        .unwrap();

    assert_eq!(metrics.get_counter(SENT) - sent_before, 4);
    assert_eq!(metrics.get_channel_counter(SENT, "sms") - sms_before, 2);
    assert_eq!(metrics.get_channel_counter(SENT, "email") - email_before, 2);
    assert_eq!(metrics.get_counter(FAILED), failed_before);
}

#[tokio::test]
#[serial]
async fn test_failed_sends_are_counted_per_channel() {
    let metrics = TestMetrics::global();
    let failed_before = metrics.get_channel_counter(FAILED, "email");

    let transport = Arc::new(RecordingTransport::new().failing_on(Channel::Email));
    let dispatcher = NotificationDispatcher::new(transport);
    dispatcher
        .dispatch(&recipients(), &payload(), &Channel::DEFAULT)
        .await
        .unwrap_err();

    assert!(metrics.get_channel_counter(FAILED, "email") - failed_before >= 1);
    assert_eq!(metrics.get_channel_counter(FAILED, "sms"), 0);
}
