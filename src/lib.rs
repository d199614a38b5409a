//! clinic-notify - appointment notifications for a hospital management system
//!
//! This library renders role- and language-specific appointment messages and
//! fans them out over SMS, email and push through a pluggable transport.
pub mod notification;
pub mod services;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod templates;

// Re-export core types for convenience
pub use crate::core::*;
pub use error::NotificationError;
pub use notification::NotificationDispatcher;
