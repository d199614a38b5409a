//! Core domain types and service traits for clinic-notify
//!
//! This module defines the data that flows through a notification dispatch
//! and the `Transport` contract that delivers rendered messages.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a recipient plays in an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

/// The language messages are rendered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// A notification delivery mechanism.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
    Push,
}

impl Channel {
    /// The channels used when the caller does not choose any.
    pub const DEFAULT: [Channel; 2] = [Channel::Sms, Channel::Email];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
            Channel::Push => "push",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named party to an appointment with optional contact details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

impl Recipient {
    /// Returns the address a message on `channel` should be sent to, or
    /// `None` if the recipient cannot be reached on that channel.
    ///
    /// Blank contact fields count as missing. Push is addressed by name and
    /// is always reachable.
    pub fn address_for<'a>(&'a self, channel: Channel) -> Option<&'a str> {
        let populated = |field: &'a Option<String>| -> Option<&'a str> {
            field
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };
        match channel {
            Channel::Sms => populated(&self.phone),
            Channel::Email => populated(&self.email),
            Channel::Push => Some(self.name.as_str()),
        }
    }
}

/// The facts about one appointment used to fill message templates.
///
/// Dates and times arrive already formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentNotificationPayload {
    pub appointment_id: String,
    pub confirmation_code: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub location: String,
    #[serde(default)]
    pub language: Language,
}

impl AppointmentNotificationPayload {
    /// Returns the name of the first blank required field, if any.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("appointmentId", &self.appointment_id),
            ("confirmationCode", &self.confirmation_code),
            ("patientName", &self.patient_name),
            ("doctorName", &self.doctor_name),
            ("date", &self.date),
            ("time", &self.time),
            ("reason", &self.reason),
            ("location", &self.location),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// How long before the appointment a reminder is sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadTime {
    #[serde(rename = "24h")]
    TwentyFourHours,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "30min")]
    ThirtyMinutes,
}

/// A rendered, channel-specific message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Sms { text: String },
    Email { subject: String, body: String },
    Push { title: String, body: String },
}

impl Message {
    pub fn channel(&self) -> Channel {
        match self {
            Message::Sms { .. } => Channel::Sms,
            Message::Email { .. } => Channel::Email,
            Message::Push { .. } => Channel::Push,
        }
    }
}

/// One planned send: a rendered message and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub channel: Channel,
    pub to: String,
    pub role: Role,
    pub message: Message,
}

/// An appointment event read from outside the library, e.g. by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppointmentEvent {
    Confirmation {
        recipients: Vec<Recipient>,
        payload: AppointmentNotificationPayload,
        #[serde(default)]
        channels: Option<Vec<Channel>>,
    },
    Reminder {
        recipients: Vec<Recipient>,
        payload: AppointmentNotificationPayload,
        lead_time: LeadTime,
    },
    Cancellation {
        recipients: Vec<Recipient>,
        payload: AppointmentNotificationPayload,
        #[serde(default)]
        reason: Option<String>,
    },
    Reschedule {
        recipients: Vec<Recipient>,
        previous: AppointmentNotificationPayload,
        payload: AppointmentNotificationPayload,
    },
}

// =============================================================================
// Service Traits
// =============================================================================

/// Delivers rendered messages to their destination.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a text message to a phone number.
    async fn send_sms(&self, to: &str, text: &str) -> Result<()>;

    /// Sends an email.
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()>;

    /// Sends a push notification to the named recipient.
    async fn send_push(&self, to: &str, title: &str, body: &str) -> Result<()>;
}
