//! A simulated transport that logs each message instead of delivering it.
//!
//! Each send waits a random delay inside the configured window to stand in
//! for provider latency. Useful for demos and for validating the pipeline.

use crate::config::SimulatedTransportConfig;
use crate::core::Transport;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{info, instrument};

/// Logs notifications via `tracing` after a simulated network delay.
#[derive(Debug, Clone)]
pub struct LoggingTransport {
    min_delay: Duration,
    max_delay: Duration,
}

impl LoggingTransport {
    /// Creates a transport whose sends take between `min_delay` and
    /// `max_delay`. A reversed window is treated as a fixed `min_delay`.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
        }
    }

    pub fn from_config(config: &SimulatedTransportConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }

    async fn simulate_latency(&self) {
        if self.max_delay.is_zero() {
            return;
        }
        let delay = rand::rng().random_range(self.min_delay..=self.max_delay);
        tokio::time::sleep(delay).await;
    }
}

impl Default for LoggingTransport {
    fn default() -> Self {
        Self::from_config(&SimulatedTransportConfig::default())
    }
}

#[async_trait]
impl Transport for LoggingTransport {
    #[instrument(skip_all, fields(channel = "sms"))]
    async fn send_sms(&self, to: &str, text: &str) -> anyhow::Result<()> {
        self.simulate_latency().await;
        info!(to, text, "SMS sent");
        Ok(())
    }

    #[instrument(skip_all, fields(channel = "email"))]
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        self.simulate_latency().await;
        info!(to, subject, body, "Email sent");
        Ok(())
    }

    #[instrument(skip_all, fields(channel = "push"))]
    async fn send_push(&self, to: &str, title: &str, body: &str) -> anyhow::Result<()> {
        self.simulate_latency().await;
        info!(to, title, body, "Push notification sent");
        Ok(())
    }
}
