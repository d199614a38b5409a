//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. The flags are merged over the TOML file and environment
//! variables when the configuration is loaded.

use crate::config::TransportKind;
use crate::core::Channel;
use clap::Parser;
use figment::{
    providers::Serialized,
    value::{Dict, Map},
    Error, Figment, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends appointment notifications described by an event file.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON appointment event to dispatch.
    #[arg(value_name = "EVENT_FILE")]
    pub event: PathBuf,

    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Channels to use when the event does not name any.
    #[arg(long, value_delimiter = ',', value_name = "CHANNELS")]
    pub channels: Option<Vec<Channel>>,

    /// Transport used to deliver messages.
    #[arg(long, value_enum)]
    pub transport: Option<TransportKind>,

    /// Logging level (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut overrides = Figment::new();

        if let Some(level) = &self.log_level {
            overrides = overrides.merge(Serialized::default("log_level", level));
        }

        if let Some(channels) = &self.channels {
            overrides = overrides.merge(Serialized::default(
                "notification.default_channels",
                channels,
            ));
        }

        if let Some(kind) = self.transport {
            overrides = overrides.merge(Serialized::default("transport.kind", kind));
        }

        overrides.data()
    }
}
