//! Message synthesis for appointment notifications.
//!
//! Every template is a pure function of the payload; which template applies
//! is decided by the recipient's role, the payload language and the channel.

pub mod confirmation;
pub mod notices;

use crate::core::{AppointmentNotificationPayload, Channel, Language, Message, Role};

pub use notices::Notice;

/// Selects one template out of the role × language × channel matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    pub role: Role,
    pub language: Language,
    pub channel: Channel,
}

impl TemplateKey {
    pub fn new(role: Role, language: Language, channel: Channel) -> Self {
        Self {
            role,
            language,
            channel,
        }
    }

    /// Every key in the matrix.
    pub fn all() -> impl Iterator<Item = TemplateKey> {
        [Role::Patient, Role::Doctor].into_iter().flat_map(|role| {
            [Language::En, Language::Ar].into_iter().flat_map(move |language| {
                [Channel::Sms, Channel::Email, Channel::Push]
                    .into_iter()
                    .map(move |channel| TemplateKey::new(role, language, channel))
            })
        })
    }
}

/// A template: renders a message from the appointment facts.
pub type RenderFn = fn(&AppointmentNotificationPayload) -> Message;
