//! Shared test helpers: a recording [`Bot`] mock and message/command builders.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use churchbot_core::{
    Bot, BotError, CallbackQuery, Chat, ChoiceButton, Command, Message, Result, User,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// One recorded outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
}

/// One recorded `edit_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub chat_id: i64,
    pub message_id: String,
    pub text: String,
}

/// One recorded `send_choices` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    pub chat_id: i64,
    pub text: String,
    pub buttons: Vec<ChoiceButton>,
}

/// Mock Bot that records every call. Chats listed in `failing` reject sends with a delivery
/// error (as Telegram does for a bot that was blocked or removed).
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    edits: Mutex<Vec<Edit>>,
    choices: Mutex<Vec<Choices>>,
    answered: Mutex<Vec<String>>,
    failing: Mutex<HashSet<i64>>,
    fail_callbacks: Mutex<bool>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mock whose sends to any of `chat_ids` fail.
    pub fn failing_for(chat_ids: &[i64]) -> Arc<Self> {
        let bot = Self::default();
        bot.failing.lock().unwrap().extend(chat_ids.iter().copied());
        Arc::new(bot)
    }

    pub fn fail_callback_answers(&self) {
        *self.fail_callbacks.lock().unwrap() = true;
    }

    /// Messages delivered so far (failed attempts are not recorded).
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.text).collect()
    }

    /// Text of the most recent delivered message.
    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|s| s.text.clone())
    }

    pub fn edits(&self) -> Vec<Edit> {
        self.edits.lock().unwrap().clone()
    }

    pub fn choices(&self) -> Vec<Choices> {
        self.choices.lock().unwrap().clone()
    }

    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }

    fn check(&self, chat_id: i64) -> Result<()> {
        if self.failing.lock().unwrap().contains(&chat_id) {
            return Err(BotError::Delivery(format!("Forbidden: bot was blocked by {}", chat_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.check(chat_id)?;
        self.sent.lock().unwrap().push(Sent {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()> {
        self.check(chat_id)?;
        self.edits.lock().unwrap().push(Edit {
            chat_id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_choices(&self, chat_id: i64, text: &str, choices: &[ChoiceButton]) -> Result<()> {
        self.check(chat_id)?;
        self.choices.lock().unwrap().push(Choices {
            chat_id,
            text: text.to_string(),
            buttons: choices.to_vec(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        if *self.fail_callbacks.lock().unwrap() {
            return Err(BotError::Network("connection reset".to_string()));
        }
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: if id < 0 { "supergroup" } else { "private" }.to_string(),
        title: None,
    }
}

/// Message from `user_id` in `chat_id`.
pub fn message(user_id: i64, chat_id: i64, text: &str) -> Message {
    Message {
        id: "10".to_string(),
        user: user(user_id),
        chat: chat(chat_id),
        content: text.to_string(),
        created_at: Utc::now(),
        reply_to_message_id: None,
        reply_to_message_content: None,
    }
}

/// Command sent by `user_id` in a private chat with the same id.
pub fn command(user_id: i64, text: &str) -> Command {
    Command::parse(message(user_id, user_id, text)).expect("text must be a command")
}

pub fn callback(user_id: i64, chat_id: i64, data: &str) -> CallbackQuery {
    CallbackQuery {
        id: format!("cb-{}", user_id),
        user: user(user_id),
        chat: Some(chat(chat_id)),
        message_id: Some("55".to_string()),
        data: data.to_string(),
    }
}
