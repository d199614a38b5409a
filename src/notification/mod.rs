//! Dispatching of appointment notifications to SMS, email and push.
//!
//! The `NotificationDispatcher` renders messages from the templates and hands
//! them to a `Transport`. Transports are interchangeable: the logging one
//! simulates delivery, the webhook one forwards to an HTTP gateway.
pub mod dispatcher;
pub mod logging_transport;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod webhook;

pub use dispatcher::NotificationDispatcher;
pub use logging_transport::LoggingTransport;
pub use webhook::WebhookTransport;
