//! The notification dispatcher turns one appointment event into a set of
//! channel-specific messages and sends them all concurrently.

use crate::core::{
    AppointmentEvent, AppointmentNotificationPayload, Channel, Delivery, LeadTime, Message,
    Recipient, Role, Transport,
};
use crate::error::NotificationError;
use crate::templates::{confirmation, notices, Notice};
use anyhow::anyhow;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Fans appointment notifications out over a `Transport`.
///
/// The dispatcher holds no mutable state; one instance can serve any number
/// of concurrent dispatches.
#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn Transport>,
    default_channels: Vec<Channel>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher that defaults to SMS and email.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            default_channels: Channel::DEFAULT.to_vec(),
        }
    }

    /// Overrides the channels used by reminders, cancellations and reschedules.
    pub fn with_default_channels(mut self, channels: Vec<Channel>) -> Self {
        self.default_channels = channels;
        self
    }

    pub fn default_channels(&self) -> &[Channel] {
        &self.default_channels
    }

    /// Plans the confirmation messages for a booking without sending anything.
    ///
    /// Recipients are visited in order and channels in `sms, email, push`
    /// order. A channel is skipped for a recipient without the matching
    /// contact field.
    pub fn plan(
        &self,
        recipients: &[Recipient],
        payload: &AppointmentNotificationPayload,
        channels: &[Channel],
    ) -> Vec<Delivery> {
        plan_with(recipients, channels, |role, channel| {
            confirmation::render(role, channel, payload)
        })
    }

    /// Sends a booking confirmation to every recipient on every requested
    /// channel they can be reached on.
    ///
    /// Resolves once every send has succeeded. Returns the first transport
    /// error observed; sends already in flight are left to finish on their
    /// own.
    #[instrument(
        skip_all,
        fields(appointment = %payload.appointment_id, recipients = recipients.len())
    )]
    pub async fn dispatch(
        &self,
        recipients: &[Recipient],
        payload: &AppointmentNotificationPayload,
        channels: &[Channel],
    ) -> Result<(), NotificationError> {
        validate(recipients, payload)?;
        let deliveries = self.plan(recipients, payload, channels);
        self.send_all(deliveries).await
    }

    /// Reminds every recipient of an upcoming appointment.
    #[instrument(skip_all, fields(appointment = %payload.appointment_id, lead_time = ?lead_time))]
    pub async fn send_appointment_reminder(
        &self,
        recipients: &[Recipient],
        payload: &AppointmentNotificationPayload,
        lead_time: LeadTime,
    ) -> Result<(), NotificationError> {
        self.send_notice(recipients, payload, Notice::Reminder(lead_time))
            .await
    }

    /// Tells every recipient that an appointment was cancelled.
    #[instrument(skip_all, fields(appointment = %payload.appointment_id))]
    pub async fn send_appointment_cancellation(
        &self,
        recipients: &[Recipient],
        payload: &AppointmentNotificationPayload,
        reason: Option<&str>,
    ) -> Result<(), NotificationError> {
        let notice = Notice::Cancellation {
            reason: reason.map(str::to_string),
        };
        self.send_notice(recipients, payload, notice).await
    }

    /// Tells every recipient that an appointment moved from the slot in
    /// `old_payload` to the one in `new_payload`.
    ///
    /// Fails with `InvalidPayload("previous.date")` or
    /// `InvalidPayload("previous.time")` before anything is sent when the old
    /// slot is blank.
    #[instrument(skip_all, fields(appointment = %new_payload.appointment_id))]
    pub async fn send_appointment_reschedule(
        &self,
        recipients: &[Recipient],
        old_payload: &AppointmentNotificationPayload,
        new_payload: &AppointmentNotificationPayload,
    ) -> Result<(), NotificationError> {
        if old_payload.date.trim().is_empty() {
            return Err(NotificationError::InvalidPayload("previous.date"));
        }
        if old_payload.time.trim().is_empty() {
            return Err(NotificationError::InvalidPayload("previous.time"));
        }
        let notice = Notice::Reschedule {
            previous_date: old_payload.date.clone(),
            previous_time: old_payload.time.clone(),
        };
        self.send_notice(recipients, new_payload, notice).await
    }

    /// Routes a parsed event to the matching operation.
    pub async fn dispatch_event(&self, event: &AppointmentEvent) -> Result<(), NotificationError> {
        match event {
            AppointmentEvent::Confirmation {
                recipients,
                payload,
                channels,
            } => {
                let channels = channels.as_deref().unwrap_or(self.default_channels.as_slice());
                self.dispatch(recipients, payload, channels).await
            }
            AppointmentEvent::Reminder {
                recipients,
                payload,
                lead_time,
            } => {
                self.send_appointment_reminder(recipients, payload, *lead_time)
                    .await
            }
            AppointmentEvent::Cancellation {
                recipients,
                payload,
                reason,
            } => {
                self.send_appointment_cancellation(recipients, payload, reason.as_deref())
                    .await
            }
            AppointmentEvent::Reschedule {
                recipients,
                previous,
                payload,
            } => {
                self.send_appointment_reschedule(recipients, previous, payload)
                    .await
            }
        }
    }

    async fn send_notice(
        &self,
        recipients: &[Recipient],
        payload: &AppointmentNotificationPayload,
        notice: Notice,
    ) -> Result<(), NotificationError> {
        validate(recipients, payload)?;
        let deliveries = plan_with(recipients, &self.default_channels, |role, channel| {
            notices::render(&notice, role, channel, payload)
        });
        self.send_all(deliveries).await
    }

    /// Spawns one task per delivery, then waits for all of them.
    async fn send_all(&self, deliveries: Vec<Delivery>) -> Result<(), NotificationError> {
        if deliveries.is_empty() {
            debug!("Nothing to send.");
            return Ok(());
        }

        let count = deliveries.len();
        let handles: Vec<_> = deliveries
            .into_iter()
            .map(|delivery| {
                let transport = Arc::clone(&self.transport);
                tokio::spawn(async move { deliver(transport.as_ref(), &delivery).await })
            })
            .collect();

        // Dropping a JoinHandle detaches the task, so a failure here does not
        // cancel sends that are still running.
        let joined = handles.into_iter().map(|handle| async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => Err(anyhow!("notification send task failed: {}", e)),
            }
        });
        try_join_all(joined).await?;

        info!(count, "All notifications sent.");
        Ok(())
    }
}

/// Performs one send and records its outcome.
async fn deliver(transport: &dyn Transport, delivery: &Delivery) -> anyhow::Result<()> {
    let result = match &delivery.message {
        Message::Sms { text } => transport.send_sms(&delivery.to, text).await,
        Message::Email { subject, body } => {
            transport.send_email(&delivery.to, subject, body).await
        }
        Message::Push { title, body } => transport.send_push(&delivery.to, title, body).await,
    };

    let channel = delivery.channel.as_str();
    match &result {
        Ok(()) => {
            metrics::counter!("notifications_sent_total", "channel" => channel).increment(1);
        }
        Err(e) => {
            metrics::counter!("notifications_failed_total", "channel" => channel).increment(1);
            error!(channel, to = %delivery.to, error = %e, "Failed to send notification");
        }
    }
    result
}

fn validate(
    recipients: &[Recipient],
    payload: &AppointmentNotificationPayload,
) -> Result<(), NotificationError> {
    if let Some(field) = payload.first_blank_field() {
        return Err(NotificationError::InvalidPayload(field));
    }
    if let Some(index) = recipients.iter().position(|r| r.name.trim().is_empty()) {
        return Err(NotificationError::InvalidRecipient(index));
    }
    Ok(())
}

/// Builds the delivery list for any template family.
fn plan_with<F>(recipients: &[Recipient], channels: &[Channel], render: F) -> Vec<Delivery>
where
    F: Fn(Role, Channel) -> Message,
{
    let mut channels = channels.to_vec();
    channels.sort();
    channels.dedup();

    let mut deliveries = Vec::new();
    for recipient in recipients {
        let before = deliveries.len();
        for &channel in &channels {
            if let Some(to) = recipient.address_for(channel) {
                deliveries.push(Delivery {
                    channel,
                    to: to.to_string(),
                    role: recipient.role,
                    message: render(recipient.role, channel),
                });
            }
        }
        if deliveries.len() == before {
            debug!(
                recipient = %recipient.name,
                ?channels,
                "Recipient has no contact details for the requested channels; skipping."
            );
        }
    }
    deliveries
}
