//! Encapsulation for setting up the notification services from configuration.

use crate::{
    config::{Config, TransportConfig, TransportKind},
    core::Transport,
    notification::{LoggingTransport, NotificationDispatcher, WebhookTransport},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Builds the transport selected by the configuration.
pub fn build_transport(config: &TransportConfig) -> Result<Arc<dyn Transport>> {
    match config.kind {
        TransportKind::Log => {
            info!(
                min_delay_ms = config.simulated.min_delay_ms,
                max_delay_ms = config.simulated.max_delay_ms,
                "Using simulated logging transport."
            );
            Ok(Arc::new(LoggingTransport::from_config(&config.simulated)))
        }
        TransportKind::Webhook => {
            let webhook = config
                .webhook
                .as_ref()
                .context("Webhook transport selected but no webhook is configured")?;
            info!(url = %webhook.url, "Using webhook transport.");
            Ok(Arc::new(WebhookTransport::from_config(webhook)?))
        }
    }
}

/// Builds a dispatcher wired to the configured transport and default channels.
pub fn setup_dispatcher(config: &Config) -> Result<NotificationDispatcher> {
    let transport = build_transport(&config.transport)?;
    Ok(NotificationDispatcher::new(transport)
        .with_default_channels(config.notification.default_channels.clone()))
}
