//! Templates for the "appointment booked" notification.

use super::{RenderFn, TemplateKey};
use crate::core::{AppointmentNotificationPayload as Payload, Channel, Language, Message, Role};

/// Resolves the confirmation template for a key.
pub fn lookup(key: TemplateKey) -> RenderFn {
    match (key.role, key.language, key.channel) {
        (Role::Patient, Language::En, Channel::Sms) => patient_en_sms,
        (Role::Patient, Language::En, Channel::Email) => patient_en_email,
        (Role::Patient, Language::En, Channel::Push) => patient_en_push,
        (Role::Patient, Language::Ar, Channel::Sms) => patient_ar_sms,
        (Role::Patient, Language::Ar, Channel::Email) => patient_ar_email,
        (Role::Patient, Language::Ar, Channel::Push) => patient_ar_push,
        (Role::Doctor, Language::En, Channel::Sms) => doctor_en_sms,
        (Role::Doctor, Language::En, Channel::Email) => doctor_en_email,
        (Role::Doctor, Language::En, Channel::Push) => doctor_en_push,
        (Role::Doctor, Language::Ar, Channel::Sms) => doctor_ar_sms,
        (Role::Doctor, Language::Ar, Channel::Email) => doctor_ar_email,
        (Role::Doctor, Language::Ar, Channel::Push) => doctor_ar_push,
    }
}

/// Renders the confirmation message for a recipient role and channel.
pub fn render(role: Role, channel: Channel, payload: &Payload) -> Message {
    lookup(TemplateKey::new(role, payload.language, channel))(payload)
}

fn patient_en_sms(p: &Payload) -> Message {
    Message::Sms {
        text: format!(
            "Hello {}, your appointment with {} on {} at {} is confirmed. Confirmation code: {}",
            p.patient_name, p.doctor_name, p.date, p.time, p.confirmation_code
        ),
    }
}

fn patient_en_email(p: &Payload) -> Message {
    Message::Email {
        subject: format!("Appointment Confirmed - {}", p.confirmation_code),
        body: format!(
            "Dear {patient},\n\n\
             Your appointment with {doctor} has been confirmed.\n\n\
             Appointment Details:\n\
             - Date: {date}\n\
             - Time: {time}\n\
             - Location: {location}\n\
             - Confirmation Code: {code}\n\
             - Reason: {reason}\n\n\
             Please arrive 15 minutes early and bring your ID and insurance card.\n\
             To reschedule or cancel, please contact us at least 24 hours in advance.",
            patient = p.patient_name,
            doctor = p.doctor_name,
            date = p.date,
            time = p.time,
            location = p.location,
            code = p.confirmation_code,
            reason = p.reason,
        ),
    }
}

fn patient_en_push(p: &Payload) -> Message {
    Message::Push {
        title: "Appointment Confirmed".to_string(),
        body: format!(
            "{}, your visit with {} is confirmed for {} at {}.",
            p.patient_name, p.doctor_name, p.date, p.time
        ),
    }
}

fn patient_ar_sms(p: &Payload) -> Message {
    Message::Sms {
        text: format!(
            "مرحباً {}، تم تأكيد موعدك مع {} يوم {} الساعة {}. رمز التأكيد: {}",
            p.patient_name, p.doctor_name, p.date, p.time, p.confirmation_code
        ),
    }
}

fn patient_ar_email(p: &Payload) -> Message {
    Message::Email {
        subject: format!("تأكيد الموعد - {}", p.confirmation_code),
        body: format!(
            "عزيزي/عزيزتي {patient}،\n\n\
             تم تأكيد موعدك مع {doctor}.\n\n\
             تفاصيل الموعد:\n\
             - التاريخ: {date}\n\
             - الوقت: {time}\n\
             - الموقع: {location}\n\
             - رمز التأكيد: {code}\n\
             - سبب الزيارة: {reason}\n\n\
             يرجى الحضور قبل الموعد بـ 15 دقيقة وإحضار الهوية وبطاقة التأمين.\n\
             لإعادة الجدولة أو الإلغاء، يرجى التواصل معنا قبل 24 ساعة على الأقل.",
            patient = p.patient_name,
            doctor = p.doctor_name,
            date = p.date,
            time = p.time,
            location = p.location,
            code = p.confirmation_code,
            reason = p.reason,
        ),
    }
}

fn patient_ar_push(p: &Payload) -> Message {
    Message::Push {
        title: "تم تأكيد الموعد".to_string(),
        body: format!(
            "{}، تم تأكيد موعدك مع {} يوم {} الساعة {}.",
            p.patient_name, p.doctor_name, p.date, p.time
        ),
    }
}

fn doctor_en_sms(p: &Payload) -> Message {
    Message::Sms {
        text: format!(
            "Hello {}, new appointment with {} on {} at {}. Reason: {}. Confirmation code: {}",
            p.doctor_name, p.patient_name, p.date, p.time, p.reason, p.confirmation_code
        ),
    }
}

fn doctor_en_email(p: &Payload) -> Message {
    Message::Email {
        subject: format!(
            "New Appointment Scheduled - {} ({})",
            p.patient_name, p.confirmation_code
        ),
        body: format!(
            "Dear {doctor},\n\n\
             A new appointment has been scheduled with {patient}.\n\n\
             Appointment Details:\n\
             - Date: {date}\n\
             - Time: {time}\n\
             - Location: {location}\n\
             - Confirmation Code: {code}\n\
             - Reason for Visit: {reason}\n\n\
             Please review the patient's medical record before the appointment.",
            doctor = p.doctor_name,
            patient = p.patient_name,
            date = p.date,
            time = p.time,
            location = p.location,
            code = p.confirmation_code,
            reason = p.reason,
        ),
    }
}

fn doctor_en_push(p: &Payload) -> Message {
    Message::Push {
        title: "New Appointment".to_string(),
        body: format!(
            "{}: {} booked for {} at {}. Reason: {}",
            p.doctor_name, p.patient_name, p.date, p.time, p.reason
        ),
    }
}

fn doctor_ar_sms(p: &Payload) -> Message {
    Message::Sms {
        text: format!(
            "مرحباً {}، موعد جديد مع المريض {} يوم {} الساعة {}. سبب الزيارة: {}. رمز التأكيد: {}",
            p.doctor_name, p.patient_name, p.date, p.time, p.reason, p.confirmation_code
        ),
    }
}

fn doctor_ar_email(p: &Payload) -> Message {
    Message::Email {
        subject: format!("موعد جديد - {} ({})", p.patient_name, p.confirmation_code),
        body: format!(
            "عزيزي {doctor}،\n\n\
             تم حجز موعد جديد مع المريض {patient}.\n\n\
             تفاصيل الموعد:\n\
             - التاريخ: {date}\n\
             - الوقت: {time}\n\
             - الموقع: {location}\n\
             - رمز التأكيد: {code}\n\
             - سبب الزيارة: {reason}\n\n\
             يرجى مراجعة السجل الطبي للمريض قبل الموعد.",
            doctor = p.doctor_name,
            patient = p.patient_name,
            date = p.date,
            time = p.time,
            location = p.location,
            code = p.confirmation_code,
            reason = p.reason,
        ),
    }
}

fn doctor_ar_push(p: &Payload) -> Message {
    Message::Push {
        title: "موعد جديد".to_string(),
        body: format!(
            "{}: موعد مع {} يوم {} الساعة {}. السبب: {}",
            p.doctor_name, p.patient_name, p.date, p.time, p.reason
        ),
    }
}
