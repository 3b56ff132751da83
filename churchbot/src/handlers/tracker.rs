//! Records every sender of plain (non-command) text in the user store.

use churchbot_core::Message;
use churchbot_storage::JsonStore;
use std::sync::Arc;
use tracing::{debug, info};

pub struct UserTracker {
    users: Arc<JsonStore<String>>,
}

impl UserTracker {
    pub fn new(users: Arc<JsonStore<String>>) -> Self {
        Self { users }
    }

    /// Adds the sender's id. Returns whether the user was new.
    pub async fn track(&self, message: &Message) -> bool {
        let username = message.user.username.as_deref().unwrap_or("NoUsername");
        if self.users.add(message.user.id.to_string()).await {
            info!(user_id = message.user.id, username = %username, "Tracked new user");
            true
        } else {
            debug!(user_id = message.user.id, username = %username, "User already tracked");
            false
        }
    }
}
