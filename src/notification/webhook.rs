//! A transport that hands messages to an HTTP notification gateway.
//!
//! Every send becomes one JSON `POST` to the configured URL. The gateway is
//! responsible for the actual SMS, email or push delivery.

use crate::config::WebhookConfig;
use crate::core::{Channel, Transport};
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Posts notifications to a webhook.
pub struct WebhookTransport {
    client: reqwest::Client,
    url: String,
}

impl WebhookTransport {
    /// Creates a new `WebhookTransport` with a per-request timeout.
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for webhook transport")?;
        Ok(Self { client, url })
    }

    pub fn from_config(config: &WebhookConfig) -> anyhow::Result<Self> {
        Self::new(
            config.url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    #[instrument(skip(self, payload), fields(url = %self.url))]
    async fn post(&self, channel: Channel, to: &str, payload: Value) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request to notification webhook failed");
                e
            })
            .with_context(|| format!("Failed to send {} to {}", channel, to))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "Notification accepted by webhook.");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        error!(status = %status, body = %text, "Webhook rejected notification");
        bail!(
            "Failed to send {} to {}: status {}, body: {}",
            channel,
            to,
            status,
            text
        );
    }
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn send_sms(&self, to: &str, text: &str) -> anyhow::Result<()> {
        let payload = json!({ "channel": Channel::Sms, "to": to, "body": text });
        self.post(Channel::Sms, to, payload).await
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let payload = json!({
            "channel": Channel::Email,
            "to": to,
            "subject": subject,
            "body": body,
        });
        self.post(Channel::Email, to, payload).await
    }

    async fn send_push(&self, to: &str, title: &str, body: &str) -> anyhow::Result<()> {
        let payload = json!({ "channel": Channel::Push, "to": to, "title": title, "body": body });
        self.post(Channel::Push, to, payload).await
    }
}
