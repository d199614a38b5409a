//! Templates for follow-up notices on an existing appointment: reminders,
//! cancellations and reschedules.
//!
//! These share one layout per channel and vary only in wording, so they are
//! composed from a per-language label set instead of one function per case.

use crate::core::{
    AppointmentNotificationPayload as Payload, Channel, Language, LeadTime, Message, Role,
};

/// A follow-up event on an appointment that was already confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Reminder(LeadTime),
    Cancellation { reason: Option<String> },
    Reschedule {
        previous_date: String,
        previous_time: String,
    },
}

struct Labels {
    greeting: &'static str,
    details: &'static str,
    date: &'static str,
    time: &'static str,
    location: &'static str,
    code: &'static str,
    reason: &'static str,
    cancellation_reason: &'static str,
    previous_slot: &'static str,
}

const EN: Labels = Labels {
    greeting: "Dear",
    details: "Appointment Details",
    date: "Date",
    time: "Time",
    location: "Location",
    code: "Confirmation Code",
    reason: "Reason",
    cancellation_reason: "Cancellation reason",
    previous_slot: "Previously",
};

const AR: Labels = Labels {
    greeting: "عزيزي/عزيزتي",
    details: "تفاصيل الموعد",
    date: "التاريخ",
    time: "الوقت",
    location: "الموقع",
    code: "رمز التأكيد",
    reason: "سبب الزيارة",
    cancellation_reason: "سبب الإلغاء",
    previous_slot: "الموعد السابق",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

/// Renders a notice for a recipient role and channel in the payload's language.
pub fn render(notice: &Notice, role: Role, channel: Channel, payload: &Payload) -> Message {
    let labels = labels(payload.language);
    let title = title(notice, payload.language);
    let summary = summary(notice, role, payload);
    let extras = extras(notice, role, payload, labels);

    match channel {
        Channel::Sms => {
            let mut text = format!("{}: {}", title, summary);
            for (label, value) in &extras {
                text.push_str(&format!(" {}: {}.", label, value));
            }
            text.push_str(&format!(" {}: {}", labels.code, payload.confirmation_code));
            Message::Sms { text }
        }
        Channel::Push => {
            let mut body = summary;
            for (label, value) in &extras {
                body.push_str(&format!(" {}: {}.", label, value));
            }
            Message::Push {
                title: title.to_string(),
                body,
            }
        }
        Channel::Email => Message::Email {
            subject: format!("{} - {}", title, payload.confirmation_code),
            body: email_body(notice, role, payload, labels, &summary),
        },
    }
}

fn title(notice: &Notice, language: Language) -> &'static str {
    match (notice, language) {
        (Notice::Reminder(_), Language::En) => "Appointment Reminder",
        (Notice::Reminder(_), Language::Ar) => "تذكير بالموعد",
        (Notice::Cancellation { .. }, Language::En) => "Appointment Cancelled",
        (Notice::Cancellation { .. }, Language::Ar) => "تم إلغاء الموعد",
        (Notice::Reschedule { .. }, Language::En) => "Appointment Rescheduled",
        (Notice::Reschedule { .. }, Language::Ar) => "تم تغيير الموعد",
    }
}

fn lead_time_phrase(lead_time: LeadTime, language: Language) -> &'static str {
    match (lead_time, language) {
        (LeadTime::TwentyFourHours, Language::En) => "in 24 hours",
        (LeadTime::TwoHours, Language::En) => "in 2 hours",
        (LeadTime::ThirtyMinutes, Language::En) => "in 30 minutes",
        (LeadTime::TwentyFourHours, Language::Ar) => "بعد 24 ساعة",
        (LeadTime::TwoHours, Language::Ar) => "بعد ساعتين",
        (LeadTime::ThirtyMinutes, Language::Ar) => "بعد 30 دقيقة",
    }
}

/// Name of the addressee, and the appointment phrased from their side.
fn addressee<'a>(role: Role, p: &'a Payload) -> (&'a str, String) {
    match (role, p.language) {
        (Role::Patient, Language::En) => (
            p.patient_name.as_str(),
            format!("your appointment with {}", p.doctor_name),
        ),
        (Role::Doctor, Language::En) => (
            p.doctor_name.as_str(),
            format!("your appointment with {}", p.patient_name),
        ),
        (Role::Patient, Language::Ar) => {
            (p.patient_name.as_str(), format!("موعدك مع {}", p.doctor_name))
        }
        (Role::Doctor, Language::Ar) => (
            p.doctor_name.as_str(),
            format!("موعدك مع المريض {}", p.patient_name),
        ),
    }
}

/// One sentence naming both parties and the (new) date and time.
fn summary(notice: &Notice, role: Role, p: &Payload) -> String {
    let (name, appointment) = addressee(role, p);
    match (notice, p.language) {
        (Notice::Reminder(lead), Language::En) => format!(
            "{}, {} is {}, on {} at {}.",
            name,
            appointment,
            lead_time_phrase(*lead, Language::En),
            p.date,
            p.time
        ),
        (Notice::Reminder(lead), Language::Ar) => format!(
            "{}، {} {}، يوم {} الساعة {}.",
            name,
            appointment,
            lead_time_phrase(*lead, Language::Ar),
            p.date,
            p.time
        ),
        (Notice::Cancellation { .. }, Language::En) => format!(
            "{}, {} on {} at {} has been cancelled.",
            name, appointment, p.date, p.time
        ),
        (Notice::Cancellation { .. }, Language::Ar) => format!(
            "{}، تم إلغاء {} يوم {} الساعة {}.",
            name, appointment, p.date, p.time
        ),
        (
            Notice::Reschedule {
                previous_date,
                previous_time,
            },
            Language::En,
        ) => format!(
            "{}, {} has moved from {} at {} to {} at {}.",
            name, appointment, previous_date, previous_time, p.date, p.time
        ),
        (
            Notice::Reschedule {
                previous_date,
                previous_time,
            },
            Language::Ar,
        ) => format!(
            "{}، تم تغيير {} من {} الساعة {} إلى {} الساعة {}.",
            name, appointment, previous_date, previous_time, p.date, p.time
        ),
    }
}

/// Labelled facts appended to short messages: the visit reason for doctors
/// and the cancellation reason when one was given.
fn extras<'a>(
    notice: &'a Notice,
    role: Role,
    p: &'a Payload,
    labels: &'static Labels,
) -> Vec<(&'static str, &'a str)> {
    let mut extras = Vec::new();
    if role == Role::Doctor {
        extras.push((labels.reason, p.reason.as_str()));
    }
    if let Notice::Cancellation {
        reason: Some(reason),
    } = notice
    {
        if !reason.trim().is_empty() {
            extras.push((labels.cancellation_reason, reason.as_str()));
        }
    }
    extras
}

fn footer(notice: &Notice, role: Role, language: Language) -> Option<&'static str> {
    if role == Role::Doctor {
        return None;
    }
    Some(match (notice, language) {
        (Notice::Reminder(_), Language::En) => {
            "Please arrive 15 minutes early and bring your ID and insurance card."
        }
        (Notice::Reminder(_), Language::Ar) => {
            "يرجى الحضور قبل الموعد بـ 15 دقيقة وإحضار الهوية وبطاقة التأمين."
        }
        (Notice::Cancellation { .. }, Language::En) => {
            "To book a new appointment, please contact us."
        }
        (Notice::Cancellation { .. }, Language::Ar) => "لحجز موعد جديد، يرجى التواصل معنا.",
        (Notice::Reschedule { .. }, Language::En) => {
            "If the new time does not suit you, please contact us at least 24 hours in advance."
        }
        (Notice::Reschedule { .. }, Language::Ar) => {
            "إذا لم يناسبك الموعد الجديد، يرجى التواصل معنا قبل 24 ساعة على الأقل."
        }
    })
}

fn email_body(notice: &Notice, role: Role, p: &Payload, labels: &Labels, summary: &str) -> String {
    let (name, _) = addressee(role, p);
    let separator = match p.language {
        Language::En => ",",
        Language::Ar => "،",
    };

    let mut lines = vec![
        format!("{} {}{}", labels.greeting, name, separator),
        String::new(),
        summary.to_string(),
        String::new(),
        format!("{}:", labels.details),
        format!("- {}: {}", labels.date, p.date),
        format!("- {}: {}", labels.time, p.time),
        format!("- {}: {}", labels.location, p.location),
        format!("- {}: {}", labels.code, p.confirmation_code),
        format!("- {}: {}", labels.reason, p.reason),
    ];
    match notice {
        Notice::Cancellation {
            reason: Some(reason),
        } if !reason.trim().is_empty() => {
            lines.push(format!("- {}: {}", labels.cancellation_reason, reason));
        }
        Notice::Reschedule {
            previous_date,
            previous_time,
        } => {
            lines.push(format!(
                "- {}: {} {}",
                labels.previous_slot, previous_date, previous_time
            ));
        }
        _ => {}
    }
    if let Some(footer) = footer(notice, role, p.language) {
        lines.push(String::new());
        lines.push(footer.to_string());
    }
    lines.join("\n")
}
