//! Add / list / remove for id sets (admins, groups). The reply copy decides which family.

use async_trait::async_trait;
use churchbot_core::{Command, Handler, HandlerError, HandlerResponse, Result};
use churchbot_storage::JsonStore;
use std::sync::Arc;
use tracing::info;

use crate::replies::RosterCopy;

fn required_id(command: &Command, usage: &str) -> Result<String> {
    command
        .first_arg()
        .map(str::to_string)
        .ok_or_else(|| HandlerError::InvalidArguments(usage.to_string()).into())
}

pub struct AddIdHandler {
    store: Arc<JsonStore<String>>,
    copy: RosterCopy,
}

impl AddIdHandler {
    pub fn new(store: Arc<JsonStore<String>>, copy: RosterCopy) -> Self {
        Self { store, copy }
    }
}

#[async_trait]
impl Handler for AddIdHandler {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let id = required_id(command, self.copy.add_usage)?;
        if self.store.add(id.clone()).await {
            info!(
                user_id = command.message.user.id,
                command = %command.name,
                id = %id,
                "Id added"
            );
            Ok(HandlerResponse::Reply((self.copy.added)(&id)))
        } else {
            Ok(HandlerResponse::Reply(self.copy.already_present.to_string()))
        }
    }
}

pub struct ListIdsHandler {
    store: Arc<JsonStore<String>>,
    copy: RosterCopy,
}

impl ListIdsHandler {
    pub fn new(store: Arc<JsonStore<String>>, copy: RosterCopy) -> Self {
        Self { store, copy }
    }
}

#[async_trait]
impl Handler for ListIdsHandler {
    async fn handle(&self, _command: &Command) -> Result<HandlerResponse> {
        let ids = self.store.all().await;
        if ids.is_empty() {
            return Ok(HandlerResponse::Reply(self.copy.list_empty.to_string()));
        }
        Ok(HandlerResponse::Reply(format!(
            "{}{}",
            self.copy.list_header,
            ids.join("\n")
        )))
    }
}

pub struct RemoveIdHandler {
    store: Arc<JsonStore<String>>,
    copy: RosterCopy,
}

impl RemoveIdHandler {
    pub fn new(store: Arc<JsonStore<String>>, copy: RosterCopy) -> Self {
        Self { store, copy }
    }
}

#[async_trait]
impl Handler for RemoveIdHandler {
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let id = required_id(command, self.copy.remove_usage)?;
        if self.store.remove(&id).await {
            info!(
                user_id = command.message.user.id,
                command = %command.name,
                id = %id,
                "Id removed"
            );
            Ok(HandlerResponse::Reply((self.copy.removed)(&id)))
        } else {
            Ok(HandlerResponse::Reply(self.copy.not_found.to_string()))
        }
    }
}
