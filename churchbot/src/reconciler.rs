//! Membership reconciler: keeps the group store in line with the chats the bot is actually in.

use churchbot_core::{Bot, MembershipTransition};
use churchbot_storage::JsonStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::replies;

/// What a transition did to the group store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Registered,
    AlreadyRegistered,
    Removed,
    NotRegistered,
    /// The new status neither adds nor removes (e.g. restricted, creator).
    Ignored,
}

pub struct MembershipReconciler {
    groups: Arc<JsonStore<String>>,
    bot: Arc<dyn Bot>,
}

impl MembershipReconciler {
    pub fn new(groups: Arc<JsonStore<String>>, bot: Arc<dyn Bot>) -> Self {
        Self { groups, bot }
    }

    /// Applies one transition. Joining as member or administrator registers the chat and posts a
    /// notice; leaving or being kicked unregisters it silently.
    #[instrument(skip(self, transition), fields(chat_id = transition.chat.id))]
    pub async fn reconcile(&self, transition: &MembershipTransition) -> Reconciliation {
        let chat_id = transition.chat.id;
        let key = chat_id.to_string();
        let new_status = transition.new_status;

        if new_status.is_present() {
            if !self.groups.add(key).await {
                debug!(status = %new_status, "Group already registered");
                return Reconciliation::AlreadyRegistered;
            }
            info!(
                old_status = %transition.old_status,
                new_status = %new_status,
                title = ?transition.chat.title,
                "Group registered automatically"
            );
            if let Err(e) = self
                .bot
                .send_message(chat_id, replies::GROUP_AUTO_REGISTERED)
                .await
            {
                warn!(error = %e, "Failed to send registration notice");
            }
            return Reconciliation::Registered;
        }

        if new_status.is_gone() {
            if self.groups.remove(&key).await {
                info!(new_status = %new_status, "Group removed");
                return Reconciliation::Removed;
            }
            debug!(new_status = %new_status, "Group was not registered");
            return Reconciliation::NotRegistered;
        }

        debug!(
            old_status = %transition.old_status,
            new_status = %new_status,
            "Membership change ignored"
        );
        Reconciliation::Ignored
    }
}
