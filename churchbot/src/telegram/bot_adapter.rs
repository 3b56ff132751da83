//! Wraps teloxide::Bot and implements [`churchbot_core::Bot`].

use async_trait::async_trait;
use churchbot_core::{parse_message_id, Bot as CoreBot, BotError, ChoiceButton, Result};
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use teloxide::RequestError;

/// Connection-level failures become [`BotError::Network`]; everything the API rejected is
/// [`BotError::Delivery`].
pub fn map_request_error(err: RequestError) -> BotError {
    match err {
        RequestError::Network(_) | RequestError::Io(_) => BotError::Network(err.to_string()),
        other => BotError::Delivery(other.to_string()),
    }
}

pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(map_request_error)?;
        Ok(())
    }

    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(id), text.to_string())
            .await
            .map_err(map_request_error)?;
        Ok(())
    }

    async fn send_choices(&self, chat_id: i64, text: &str, choices: &[ChoiceButton]) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(choices.iter().map(|c| {
            vec![InlineKeyboardButton::callback(
                c.label.clone(),
                c.payload.clone(),
            )]
        }));
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .reply_markup(keyboard)
            .await
            .map_err(map_request_error)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(map_request_error)?;
        Ok(())
    }
}
