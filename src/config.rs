//! Configuration management for clinic-notify
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer defaults, a TOML file, environment variables
//! and command-line arguments.

use crate::cli::Cli;
use crate::core::Channel;
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Notification defaults.
    pub notification: NotificationConfig,
    /// Which transport delivers messages, and its settings.
    pub transport: TransportConfig,
}

/// Notification defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Channels used when an event does not name any.
    pub default_channels: Vec<Channel>,
}

/// The transport implementation to use.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Log messages after a simulated delay.
    Log,
    /// Post messages to an HTTP gateway.
    Webhook,
}

/// Configuration for message delivery.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportConfig {
    pub kind: TransportKind,
    /// Settings for the simulated transport.
    #[serde(default)]
    pub simulated: SimulatedTransportConfig,
    /// Settings for the webhook transport.
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

/// Latency window for the simulated transport.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimulatedTransportConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for SimulatedTransportConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 300,
            max_delay_ms: 800,
        }
    }
}

/// Configuration for the webhook transport.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WebhookConfig {
    /// The gateway URL every notification is posted to.
    pub url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_webhook_timeout")]
    pub timeout_seconds: u64,
}

fn default_webhook_timeout() -> u64 {
    10
}

impl Config {
    /// Loads the configuration by layering defaults, the TOML file named on
    /// the command line, `CLINIC_NOTIFY_*` environment variables and finally
    /// the command-line flags themselves.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            // e.g. CLINIC_NOTIFY_TRANSPORT__KIND=webhook
            .merge(Env::prefixed("CLINIC_NOTIFY_").split("__"))
            .merge(cli.clone())
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot produce a working dispatcher.
    pub fn validate(&self) -> Result<()> {
        if self.notification.default_channels.is_empty() {
            bail!("notification.default_channels must name at least one channel");
        }
        let simulated = &self.transport.simulated;
        if simulated.min_delay_ms > simulated.max_delay_ms {
            bail!(
                "transport.simulated.min_delay_ms ({}) is greater than max_delay_ms ({})",
                simulated.min_delay_ms,
                simulated.max_delay_ms
            );
        }
        if self.transport.kind == TransportKind::Webhook {
            match &self.transport.webhook {
                Some(webhook) if !webhook.url.trim().is_empty() => {}
                _ => bail!("transport.kind is \"webhook\" but transport.webhook.url is not set"),
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notification: NotificationConfig {
                default_channels: Channel::DEFAULT.to_vec(),
            },
            transport: TransportConfig {
                kind: TransportKind::Log,
                simulated: SimulatedTransportConfig::default(),
                webhook: None,
            },
        }
    }
}
