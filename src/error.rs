use thiserror::Error;

/// Errors returned by a notification dispatch.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("invalid notification payload: `{0}` is blank")]
    InvalidPayload(&'static str),

    #[error("invalid recipient at position {0}: name is blank")]
    InvalidRecipient(usize),

    /// A transport call failed. The transport's own error is passed through.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
