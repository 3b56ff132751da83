//! Bot abstraction for outbound calls to the messaging gateway.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in the `churchbot` crate.

use crate::error::{BotError, Result};
use crate::types::{ChoiceButton, Message};
use async_trait::async_trait;

/// Outbound gateway calls. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Sends a reply into the chat of the given message.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(message.chat.id, text).await
    }

    /// Replaces the text of an already-sent message. `message_id` is transport-specific.
    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()>;

    /// Sends a message with one inline button per row.
    async fn send_choices(&self, chat_id: i64, text: &str, choices: &[ChoiceButton]) -> Result<()>;

    /// Acknowledges a callback query so the client stops its loading indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Delivery(format!("Invalid message_id for edit: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }
}
