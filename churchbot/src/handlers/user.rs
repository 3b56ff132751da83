//! Commands open to every user.

use async_trait::async_trait;
use churchbot_core::{Command, Handler, HandlerError, HandlerResponse, Result};
use churchbot_storage::{JsonStore, PrayerRequest};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::replies;

/// Replies with fixed text (`/start`, `/cmd`, `/verse`, `/daily_inspiration`).
pub struct StaticReplyHandler {
    text: &'static str,
}

impl StaticReplyHandler {
    pub fn new(text: &'static str) -> Self {
        Self { text }
    }
}

#[async_trait]
impl Handler for StaticReplyHandler {
    async fn handle(&self, _command: &Command) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(self.text.to_string()))
    }
}

pub struct MyIdHandler;

#[async_trait]
impl Handler for MyIdHandler {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(replies::your_user_id(
            command.message.user.id,
        )))
    }
}

pub struct ChatIdHandler;

#[async_trait]
impl Handler for ChatIdHandler {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(replies::chat_id(command.chat_id())))
    }
}

/// `/prayer <text>`: appends to the prayer log.
pub struct PrayerHandler {
    prayers: Arc<JsonStore<PrayerRequest>>,
}

impl PrayerHandler {
    pub fn new(prayers: Arc<JsonStore<PrayerRequest>>) -> Self {
        Self { prayers }
    }
}

#[async_trait]
impl Handler for PrayerHandler {
    #[instrument(skip(self, command))]
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let text = command.arg_text();
        if text.is_empty() {
            return Err(HandlerError::InvalidArguments(replies::PRAYER_USAGE.to_string()).into());
        }
        self.prayers
            .append(PrayerRequest::new(command.caller_id(), text))
            .await;
        info!(user_id = command.message.user.id, "Prayer request added");
        Ok(HandlerResponse::Reply(replies::PRAYER_ADDED.to_string()))
    }
}

pub struct PrayerListHandler {
    prayers: Arc<JsonStore<PrayerRequest>>,
}

impl PrayerListHandler {
    pub fn new(prayers: Arc<JsonStore<PrayerRequest>>) -> Self {
        Self { prayers }
    }
}

#[async_trait]
impl Handler for PrayerListHandler {
    async fn handle(&self, _command: &Command) -> Result<HandlerResponse> {
        let prayers = self.prayers.all().await;
        if prayers.is_empty() {
            return Ok(HandlerResponse::Reply(replies::PRAYER_LIST_EMPTY.to_string()));
        }
        let mut text = replies::PRAYER_LIST_HEADER.to_string();
        for p in &prayers {
            text.push_str(&format!("- {} (User {})\n", p.text, p.user));
        }
        Ok(HandlerResponse::Reply(text.trim_end().to_string()))
    }
}

pub struct EventsHandler {
    events: Arc<JsonStore<String>>,
}

impl EventsHandler {
    pub fn new(events: Arc<JsonStore<String>>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Handler for EventsHandler {
    async fn handle(&self, _command: &Command) -> Result<HandlerResponse> {
        let events = self.events.all().await;
        if events.is_empty() {
            return Ok(HandlerResponse::Reply(replies::EVENTS_EMPTY.to_string()));
        }
        Ok(HandlerResponse::Reply(format!(
            "{}{}",
            replies::EVENTS_HEADER,
            events.join("\n")
        )))
    }
}
