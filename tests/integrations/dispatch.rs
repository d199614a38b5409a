//! Integration tests for the notification fan-out.

use clinic_notify::{
    notification::test_utils::RecordingTransport, AppointmentEvent,
    AppointmentNotificationPayload, Channel, Language, NotificationDispatcher, NotificationError,
    Recipient, Role,
};
use std::sync::Arc;

fn ali() -> Recipient {
    Recipient {
        name: "Ali".to_string(),
        phone: Some("+966501234567".to_string()),
        email: Some("ali@x.com".to_string()),
        role: Role::Patient,
    }
}

fn sara() -> Recipient {
    Recipient {
        name: "Dr. Sara".to_string(),
        phone: Some("+966500000000".to_string()),
        email: Some("sara@x.com".to_string()),
        role: Role::Doctor,
    }
}

fn payload(language: Language) -> AppointmentNotificationPayload {
    AppointmentNotificationPayload {
        appointment_id: "A1".to_string(),
        confirmation_code: "APT123ABC".to_string(),
        patient_name: "Ali".to_string(),
        doctor_name: "Dr. Sara".to_string(),
        date: "Monday, January 20, 2026".to_string(),
        time: "10:00 AM".to_string(),
        reason: "Follow-up".to_string(),
        location: "Main Clinic".to_string(),
        language,
    }
}

#[tokio::test]
async fn test_booking_example_sends_four_messages() {
    // Arrange
    let transport = Arc::new(RecordingTransport::new());
    let dispatcher = NotificationDispatcher::new(transport.clone());

    // Act
    dispatcher
        .dispatch(&[ali(), sara()], &payload(Language::En), &[Channel::Sms, Channel::Email])
        .await
        .unwrap();

    // Assert
    let sends = transport.sends();
    assert_eq!(sends.len(), 4);

    let mut addresses: Vec<&str> = sends.iter().map(|s| s.to.as_str()).collect();
    addresses.sort();
    assert_eq!(
        addresses,
        vec!["+966500000000", "+966501234567", "ali@x.com", "sara@x.com"]
    );

    for send in &sends {
        for needle in ["Ali", "Dr. Sara", "APT123ABC", "10:00 AM"] {
            assert!(send.contains(needle), "{:?} is missing {}", send, needle);
        }
        let to_doctor = send.to == "+966500000000" || send.to == "sara@x.com";
        if to_doctor {
            assert!(send.contains("Follow-up"), "{:?}", send);
        } else if send.channel == Channel::Sms {
            assert!(!send.contains("Follow-up"), "{:?}", send);
        }
    }
}

#[tokio::test]
async fn test_fan_out_count_matches_reachable_pairs() {
    let transport = Arc::new(RecordingTransport::new());
    let dispatcher = NotificationDispatcher::new(transport.clone());
    let mut no_phone = ali();
    no_phone.phone = None;
    let mut no_email = sara();
    no_email.email = None;
    let mut unreachable = ali();
    unreachable.name = "Walk-in".to_string();
    unreachable.phone = None;
    unreachable.email = None;

    dispatcher
        .dispatch(
            &[no_phone, no_email, unreachable],
            &payload(Language::Ar),
            &[Channel::Sms, Channel::Email, Channel::Push],
        )
        .await
        .unwrap();

    // email + push, sms + push, push
    let sends = transport.sends();
    assert_eq!(sends.len(), 5);
    assert_eq!(sends.iter().filter(|s| s.channel == Channel::Push).count(), 3);
    assert!(sends
        .iter()
        .filter(|s| s.channel != Channel::Push)
        .all(|s| s.contains("رمز التأكيد")));
}

#[tokio::test]
async fn test_transport_failure_rejects_the_whole_dispatch() {
    let transport = Arc::new(RecordingTransport::new().failing_on(Channel::Email));
    let dispatcher = NotificationDispatcher::new(transport.clone());

    let err = dispatcher
        .dispatch(&[ali(), sara()], &payload(Language::En), &Channel::DEFAULT)
        .await
        .unwrap_err();

    assert!(matches!(err, NotificationError::Transport(_)));
    assert!(err.to_string().starts_with("simulated email failure"), "{}", err);
}

#[tokio::test]
async fn test_failed_sends_are_recorded_as_attempts() {
    let transport = Arc::new(RecordingTransport::new().failing_on(Channel::Email));
    let dispatcher = NotificationDispatcher::new(transport.clone());

    dispatcher
        .dispatch(&[ali(), sara()], &payload(Language::En), &Channel::DEFAULT)
        .await
        .unwrap_err();
    // Sends still running after the early return are left to finish.
    tokio::task::yield_now().await;

    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 4);
    let failed = attempts.iter().filter(|a| a.channel == Channel::Email).count();
    assert_eq!(failed, 2);
    assert!(transport.sends().iter().all(|s| s.channel == Channel::Sms));
}

#[tokio::test]
async fn test_cancellation_event_from_json() {
    let transport = Arc::new(RecordingTransport::new());
    let dispatcher = NotificationDispatcher::new(transport.clone());
    let event: AppointmentEvent = serde_json::from_str(
        r#"{
            "kind": "cancellation",
            "reason": "Doctor unavailable",
            "recipients": [{"name": "Ali", "email": "ali@x.com", "role": "patient"}],
            "payload": {
                "appointmentId": "A1", "confirmationCode": "APT123ABC",
                "patientName": "Ali", "doctorName": "Dr. Sara",
                "date": "Monday, January 20, 2026", "time": "10:00 AM",
                "reason": "Follow-up", "location": "Main Clinic", "language": "en"
            }
        }"#,
    )
    .unwrap();

    dispatcher.dispatch_event(&event).await.unwrap();

    let sends = transport.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].heading, "Appointment Cancelled - APT123ABC");
    assert!(sends[0].contains("Doctor unavailable"));
}
