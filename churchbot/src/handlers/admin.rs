//! Admin-only actions beyond roster management: broadcasts and the event log.
//! These handlers do not check the caller themselves; register them behind `AdminGate`.

use async_trait::async_trait;
use churchbot_core::{Bot, Command, Handler, HandlerError, HandlerResponse, Result};
use churchbot_storage::JsonStore;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::fanout::{fan_out, Audience};
use crate::replies;

/// `/broadcast` and `/broadcast_users`: fans the argument text out to one recipient store.
pub struct BroadcastHandler {
    bot: Arc<dyn Bot>,
    recipients: Arc<JsonStore<String>>,
    audience: Audience,
}

impl BroadcastHandler {
    pub fn new(bot: Arc<dyn Bot>, recipients: Arc<JsonStore<String>>, audience: Audience) -> Self {
        Self {
            bot,
            recipients,
            audience,
        }
    }

    fn usage(&self) -> &'static str {
        match self.audience {
            Audience::Groups => replies::BROADCAST_USAGE,
            Audience::Users => replies::BROADCAST_USERS_USAGE,
        }
    }
}

#[async_trait]
impl Handler for BroadcastHandler {
    #[instrument(skip(self, command), fields(audience = %self.audience))]
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let text = command.arg_text();
        if text.is_empty() {
            return Err(HandlerError::InvalidArguments(self.usage().to_string()).into());
        }
        let recipients = self.recipients.all().await;
        info!(
            user_id = command.message.user.id,
            recipients = recipients.len(),
            "Broadcast requested"
        );
        let report = fan_out(self.bot.as_ref(), self.audience, &recipients, &text).await;
        let reply = match self.audience {
            Audience::Groups => replies::group_broadcast_report(report.delivered, report.failed),
            Audience::Users => replies::user_broadcast_report(report.delivered, report.failed),
        };
        Ok(HandlerResponse::Reply(reply))
    }
}

pub struct AddEventHandler {
    events: Arc<JsonStore<String>>,
}

impl AddEventHandler {
    pub fn new(events: Arc<JsonStore<String>>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Handler for AddEventHandler {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let text = command.arg_text();
        if text.is_empty() {
            return Err(HandlerError::InvalidArguments(replies::EVENT_USAGE.to_string()).into());
        }
        self.events.append(text).await;
        info!(user_id = command.message.user.id, "Event added");
        Ok(HandlerResponse::Reply(replies::EVENT_ADDED.to_string()))
    }
}

pub struct ClearEventsHandler {
    events: Arc<JsonStore<String>>,
}

impl ClearEventsHandler {
    pub fn new(events: Arc<JsonStore<String>>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Handler for ClearEventsHandler {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        self.events.clear().await;
        info!(user_id = command.message.user.id, "Events cleared");
        Ok(HandlerResponse::Reply(replies::EVENTS_CLEARED.to_string()))
    }
}
