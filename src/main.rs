//! clinic-notify - sends the notifications for one appointment event.
//!
//! Reads an appointment event from a JSON file, builds the configured
//! transport and dispatches every message, exiting non-zero on failure.

use anyhow::{Context, Result};
use clap::Parser;
use clinic_notify::{cli::Cli, config::Config, core::AppointmentEvent, services};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        init_logging("error");
        error!("Failed to load configuration: {:#}", err);
        std::process::exit(1);
    });

    init_logging(&config.log_level);

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Transport: {:?}", config.transport.kind);
    let channels: Vec<&str> = config
        .notification
        .default_channels
        .iter()
        .map(|c| c.as_str())
        .collect();
    info!("Default Channels: {}", channels.join(", "));
    info!("-------------------------------------------------------");

    let raw = std::fs::read_to_string(&cli.event)
        .with_context(|| format!("Failed to read event file {}", cli.event.display()))?;
    let event: AppointmentEvent = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse event file {}", cli.event.display()))?;

    let dispatcher = services::setup_dispatcher(&config)?;

    if let Err(e) = dispatcher.dispatch_event(&event).await {
        error!("Notification dispatch failed: {}", e);
        return Err(e.into());
    }

    info!("Notification dispatch complete.");
    println!("Notifications sent.");
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` takes precedence over the configured level.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
