//! # Command router
//!
//! Static tables built once at startup: command name → [`Handler`], callback payload →
//! [`CallbackHandler`]. Registration takes an `Option` so feature-gated handlers can be passed
//! through as `None`; those commands are simply unavailable.

use churchbot_core::{CallbackHandler, CallbackQuery, Command, Handler, HandlerResponse, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Default)]
pub struct CommandRouter {
    commands: HashMap<String, Arc<dyn Handler>>,
    callbacks: HashMap<String, Arc<dyn CallbackHandler>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name` (without the leading `/`). `None` is skipped.
    /// Registering a name twice keeps the last handler.
    pub fn register(mut self, name: &str, handler: Option<Arc<dyn Handler>>) -> Self {
        let name = name.trim_start_matches('/').to_lowercase();
        match handler {
            Some(handler) => {
                if self.commands.insert(name.clone(), handler).is_some() {
                    warn!(command = %name, "Command registered twice, last registration wins");
                }
            }
            None => debug!(command = %name, "Handler not provided, command unavailable"),
        }
        self
    }

    /// Registers `handler` for the callback `payload`. `None` is skipped.
    pub fn register_callback(
        mut self,
        payload: &str,
        handler: Option<Arc<dyn CallbackHandler>>,
    ) -> Self {
        match handler {
            Some(handler) => {
                if self.callbacks.insert(payload.to_string(), handler).is_some() {
                    warn!(payload = %payload, "Callback registered twice, last registration wins");
                }
            }
            None => debug!(payload = %payload, "Callback handler not provided, payload unavailable"),
        }
        self
    }

    pub fn command(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.commands.get(name)
    }

    pub fn callback(&self, payload: &str) -> Option<&Arc<dyn CallbackHandler>> {
        self.callbacks.get(payload)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the handler registered for `command`. `Ok(None)` when the name is unknown.
    #[instrument(skip(self, command), fields(command = %command.name))]
    pub async fn route_command(&self, command: &Command) -> Result<Option<HandlerResponse>> {
        let Some(handler) = self.commands.get(&command.name) else {
            debug!(user_id = command.message.user.id, "Unknown command");
            return Ok(None);
        };
        info!(
            user_id = command.message.user.id,
            chat_id = command.chat_id(),
            "step: routing command"
        );
        handler.handle(command).await.map(Some)
    }

    /// Runs the handler registered for the query payload. `Ok(false)` when the payload is unknown.
    #[instrument(skip(self, query), fields(payload = %query.data))]
    pub async fn route_callback(&self, query: &CallbackQuery) -> Result<bool> {
        let Some(handler) = self.callbacks.get(&query.data) else {
            debug!(user_id = query.user.id, "Unknown callback payload");
            return Ok(false);
        };
        info!(user_id = query.user.id, "step: routing callback");
        handler.handle(query).await?;
        Ok(true)
    }
}
