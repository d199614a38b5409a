//! A transport that records what it is asked to send, for tests.

use crate::core::{Channel, Transport};
use anyhow::bail;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call made against a `RecordingTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSend {
    pub channel: Channel,
    pub to: String,
    /// Subject for email, title for push, empty for SMS.
    pub heading: String,
    pub body: String,
}

impl RecordedSend {
    /// Whether the heading or body mentions `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.heading.contains(needle) || self.body.contains(needle)
    }
}

/// Records every send. Can be told to fail for specific addresses or
/// channels, and to delay the sends that succeed.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sends: Arc<Mutex<Vec<RecordedSend>>>,
    attempts: Arc<Mutex<Vec<RecordedSend>>>,
    failing_addresses: HashSet<String>,
    failing_channels: HashSet<Channel>,
    delay: Option<Duration>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send to `address` fails immediately.
    pub fn failing_for(mut self, address: &str) -> Self {
        self.failing_addresses.insert(address.to_string());
        self
    }

    /// Every send on `channel` fails immediately.
    pub fn failing_on(mut self, channel: Channel) -> Self {
        self.failing_channels.insert(channel);
        self
    }

    /// Successful sends sleep for `delay` before they are recorded.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The sends that succeeded so far, in completion order.
    pub fn sends(&self) -> Vec<RecordedSend> {
        self.sends.lock().unwrap().clone()
    }

    /// Every send the transport was asked to make, failed ones included, in
    /// the order they were started.
    pub fn attempts(&self) -> Vec<RecordedSend> {
        self.attempts.lock().unwrap().clone()
    }

    async fn record(
        &self,
        channel: Channel,
        to: &str,
        heading: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let send = RecordedSend {
            channel,
            to: to.to_string(),
            heading: heading.to_string(),
            body: body.to_string(),
        };
        self.attempts.lock().unwrap().push(send.clone());

        if self.failing_addresses.contains(to) || self.failing_channels.contains(&channel) {
            bail!("simulated {} failure for {}", channel, to);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sends.lock().unwrap().push(send);
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_sms(&self, to: &str, text: &str) -> anyhow::Result<()> {
        self.record(Channel::Sms, to, "", text).await
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        self.record(Channel::Email, to, subject, body).await
    }

    async fn send_push(&self, to: &str, title: &str, body: &str) -> anyhow::Result<()> {
        self.record(Channel::Push, to, title, body).await
    }
}
