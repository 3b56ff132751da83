//! Admin gate: wraps a handler so only callers in the admin store reach it.

use async_trait::async_trait;
use churchbot_core::{Command, Handler, HandlerError, HandlerResponse, Result};
use churchbot_storage::JsonStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fails closed: a non-admin gets [`HandlerError::Unauthorized`] and the inner handler never runs.
/// Errors from the inner handler pass through untouched.
pub struct AdminGate {
    admins: Arc<JsonStore<String>>,
    inner: Arc<dyn Handler>,
}

impl AdminGate {
    pub fn new(admins: Arc<JsonStore<String>>, inner: Arc<dyn Handler>) -> Self {
        Self { admins, inner }
    }

    /// Wraps `inner` and returns it as a plain handler ready for registration.
    pub fn wrap(admins: Arc<JsonStore<String>>, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Self::new(admins, inner))
    }
}

#[async_trait]
impl Handler for AdminGate {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let caller = command.caller_id();
        if !self.admins.contains(&caller).await {
            warn!(
                user_id = command.message.user.id,
                command = %command.name,
                "Unauthorized access attempt"
            );
            return Err(HandlerError::Unauthorized.into());
        }
        debug!(user_id = command.message.user.id, command = %command.name, "Admin check passed");
        self.inner.handle(command).await
    }
}
