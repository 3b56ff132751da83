//! # Update dispatcher
//!
//! Single entry point for inbound events. Commands and callbacks go through the
//! [`CommandRouter`], plain text to the [`UserTracker`], membership changes to the
//! [`MembershipReconciler`]. Handler errors stop here: the user sees fixed copy, never the
//! error detail.

use churchbot_core::{
    Bot, BotError, CallbackQuery, Command, HandlerError, HandlerResponse, Message, Update,
};
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info, instrument, warn};

use crate::handlers::UserTracker;
use crate::reconciler::MembershipReconciler;
use crate::replies;
use crate::router::CommandRouter;

pub struct UpdateDispatcher {
    router: CommandRouter,
    bot: Arc<dyn Bot>,
    tracker: Option<UserTracker>,
    reconciler: Option<MembershipReconciler>,
    /// Own username once known; `/cmd@other_bot` is then ignored.
    bot_username: OnceLock<String>,
}

impl UpdateDispatcher {
    pub fn new(router: CommandRouter, bot: Arc<dyn Bot>) -> Self {
        Self {
            router,
            bot,
            tracker: None,
            reconciler: None,
            bot_username: OnceLock::new(),
        }
    }

    pub fn with_tracker(mut self, tracker: UserTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn with_reconciler(mut self, reconciler: MembershipReconciler) -> Self {
        self.reconciler = Some(reconciler);
        self
    }

    /// Records the bot's own username. Later calls keep the first value.
    pub fn set_bot_username(&self, username: impl Into<String>) {
        let username = username.into();
        if let Err(rejected) = self.bot_username.set(username) {
            debug!(username = %rejected, "Bot username already set");
        }
    }

    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.get().map(String::as_str)
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Handles one update. Never fails; problems are logged and, for commands, answered with
    /// fixed copy.
    pub async fn dispatch(&self, update: Update) {
        match update {
            Update::Command(command) => self.dispatch_command(&command).await,
            Update::Callback(query) => self.dispatch_callback(&query).await,
            Update::Text(message) => self.dispatch_text(&message).await,
            Update::Membership(transition) => {
                if let Some(reconciler) = &self.reconciler {
                    reconciler.reconcile(&transition).await;
                }
            }
        }
    }

    #[instrument(skip(self, command), fields(command = %command.name))]
    async fn dispatch_command(&self, command: &Command) {
        if let Some(own) = self.bot_username() {
            if !command.is_addressed_to(own) {
                debug!(addressee = ?command.addressee, "Command for another bot ignored");
                return;
            }
        }
        info!(
            user_id = command.message.user.id,
            chat_id = command.chat_id(),
            "Received command"
        );
        let reply = match self.router.route_command(command).await {
            Ok(Some(HandlerResponse::Reply(text))) => Some(text),
            Ok(Some(HandlerResponse::Stop)) | Ok(None) => None,
            Err(e) => Some(self.render_error(command, e)),
        };
        if let Some(text) = reply {
            if let Err(e) = self.bot.reply_to(&command.message, &text).await {
                warn!(error = %e, user_id = command.message.user.id, "Failed to send reply");
            }
        }
    }

    /// Maps a handler error to the text shown to the user.
    fn render_error(&self, command: &Command, err: BotError) -> String {
        match err {
            BotError::Handler(HandlerError::Unauthorized) => replies::UNAUTHORIZED.to_string(),
            BotError::Handler(HandlerError::InvalidArguments(usage)) => {
                debug!(user_id = command.message.user.id, "Invalid arguments");
                usage
            }
            other => {
                error!(
                    error = %other,
                    user_id = command.message.user.id,
                    "Command handler failed"
                );
                replies::INTERNAL_ERROR.to_string()
            }
        }
    }

    #[instrument(skip(self, query), fields(payload = %query.data))]
    async fn dispatch_callback(&self, query: &CallbackQuery) {
        if let Err(e) = self.bot.answer_callback(&query.id).await {
            warn!(error = %e, user_id = query.user.id, "Failed to answer callback");
        }
        if let Err(e) = self.router.route_callback(query).await {
            error!(error = %e, user_id = query.user.id, "Callback handler failed");
        }
    }

    async fn dispatch_text(&self, message: &Message) {
        match &self.tracker {
            Some(tracker) => {
                tracker.track(message).await;
            }
            None => debug!(user_id = message.user.id, "Text ignored"),
        }
    }
}
