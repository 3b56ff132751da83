//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] carries the faults a handler renders
//! back to the caller (authorization and argument validation).

use thiserror::Error;

/// Top-level error for gateway calls, handlers and collaborators.
#[derive(Error, Debug)]
pub enum BotError {
    /// Connection-level failure talking to the gateway. The only retryable class.
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway rejected an outbound call (blocked sender, unknown chat, bad id).
    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    /// The translation service failed or returned an unreadable body.
    #[error("Translation error: {0}")]
    Translation(String),
}

impl BotError {
    /// True for faults worth retrying after a backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, BotError::Network(_))
    }
}

/// Errors produced by handlers that are rendered to the invoking user.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unauthorized access")]
    Unauthorized,

    /// Missing or malformed command arguments; the payload is the usage hint.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_transient() {
        assert!(BotError::Network("reset".into()).is_transient());
        assert!(!BotError::Delivery("blocked".into()).is_transient());
        assert!(!BotError::Translation("503".into()).is_transient());
        assert!(!BotError::Handler(HandlerError::Unauthorized).is_transient());
    }

    #[test]
    fn test_handler_error_converts_into_bot_error() {
        let err: BotError = HandlerError::InvalidArguments("/addadmin <id>".into()).into();
        assert!(matches!(
            err,
            BotError::Handler(HandlerError::InvalidArguments(_))
        ));
        assert_eq!(err.to_string(), "Handler error: Invalid arguments: /addadmin <id>");
    }
}
