//! Long-polling gateway. `connect` verifies the token with `getMe`; `listen` runs a teloxide
//! dispatcher until cancellation or a fault worth reporting to the orchestrator.

use async_trait::async_trait;
use churchbot_core::{ToCoreMessage, Update as CoreUpdate};
use std::sync::{Arc, Mutex};
use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, CallbackQuery, ChatMemberUpdated, Message, Update};
use teloxide::update_listeners::Polling;
use teloxide::{ApiError, RequestError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMembershipWrapper, TelegramMessageWrapper};
use crate::config::LONG_POLL_TIMEOUT;
use crate::dispatcher::UpdateDispatcher;
use crate::session::{Gateway, SessionFault};

/// Sorts a listener error: `Some(fault)` ends the session, `None` is logged and polling goes on.
pub fn classify_request_error(err: &RequestError) -> Option<SessionFault> {
    match err {
        RequestError::Network(_) | RequestError::Io(_) => {
            Some(SessionFault::Network(err.to_string()))
        }
        RequestError::Api(ApiError::InvalidToken)
        | RequestError::Api(ApiError::TerminatedByOtherGetUpdates) => {
            Some(SessionFault::Unexpected(err.to_string()))
        }
        _ => None,
    }
}

pub struct TelegramGateway {
    bot: teloxide::Bot,
    dispatcher: Arc<UpdateDispatcher>,
}

impl TelegramGateway {
    pub fn new(bot: teloxide::Bot, dispatcher: Arc<UpdateDispatcher>) -> Self {
        Self { bot, dispatcher }
    }
}

async fn on_message(msg: Message, dispatcher: Arc<UpdateDispatcher>) -> ResponseResult<()> {
    if msg.text().is_none() {
        debug!(chat_id = msg.chat.id.0, "Non-text message ignored");
        return Ok(());
    }
    let Some(core) = TelegramMessageWrapper(&msg).to_core() else {
        debug!(chat_id = msg.chat.id.0, "Message without sender ignored");
        return Ok(());
    };
    dispatcher.dispatch(CoreUpdate::from_message(core)).await;
    Ok(())
}

async fn on_callback(q: CallbackQuery, dispatcher: Arc<UpdateDispatcher>) -> ResponseResult<()> {
    let core = TelegramCallbackWrapper(&q).to_core();
    dispatcher.dispatch(CoreUpdate::Callback(core)).await;
    Ok(())
}

async fn on_my_chat_member(
    upd: ChatMemberUpdated,
    dispatcher: Arc<UpdateDispatcher>,
) -> ResponseResult<()> {
    let core = TelegramMembershipWrapper(&upd).to_core();
    dispatcher.dispatch(CoreUpdate::Membership(core)).await;
    Ok(())
}

#[async_trait]
impl Gateway for TelegramGateway {
    #[instrument(skip(self))]
    async fn connect(&self) -> Result<(), SessionFault> {
        let me = self.bot.get_me().await.map_err(|e| {
            classify_request_error(&e).unwrap_or_else(|| SessionFault::Unexpected(e.to_string()))
        })?;
        info!(
            username = ?me.user.username,
            bot_id = me.user.id.0,
            "Connected to Telegram"
        );
        if let Some(username) = &me.user.username {
            self.dispatcher.set_bot_username(username.as_str());
        }
        Ok(())
    }

    #[instrument(skip(self, cancel))]
    async fn listen(&self, cancel: CancellationToken) -> Result<(), SessionFault> {
        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(on_message))
            .branch(Update::filter_callback_query().endpoint(on_callback))
            .branch(Update::filter_my_chat_member().endpoint(on_my_chat_member));

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![self.dispatcher.clone()])
            .default_handler(|upd| async move {
                debug!(update_id = ?upd.id, "Unhandled update");
            })
            .build();
        let shutdown = dispatcher.shutdown_token();

        let listener = Polling::builder(self.bot.clone())
            .timeout(LONG_POLL_TIMEOUT)
            .drop_pending_updates()
            .allowed_updates(vec![
                AllowedUpdate::Message,
                AllowedUpdate::CallbackQuery,
                AllowedUpdate::MyChatMember,
            ])
            .build();

        let fault: Arc<Mutex<Option<SessionFault>>> = Arc::new(Mutex::new(None));
        let error_handler = {
            let fault = fault.clone();
            let shutdown = shutdown.clone();
            Arc::new(move |err: RequestError| {
                let fault = fault.clone();
                let shutdown = shutdown.clone();
                async move {
                    let Some(session_fault) = classify_request_error(&err) else {
                        warn!(error = %err, "Update listener error");
                        return;
                    };
                    error!(error = %err, "Update listener fault, stopping dispatcher");
                    fault
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .get_or_insert(session_fault);
                    if shutdown.shutdown().is_err() {
                        debug!("Dispatcher already idle");
                    }
                }
            })
        };

        let dispatch = dispatcher.dispatch_with_listener(listener, error_handler);
        tokio::pin!(dispatch);
        tokio::select! {
            _ = &mut dispatch => {}
            _ = cancel.cancelled() => {
                info!("Cancellation requested, stopping dispatcher");
                let requested = shutdown.shutdown().is_ok();
                if requested {
                    dispatch.await;
                } else {
                    debug!("Dispatcher idle at cancellation");
                }
            }
        }

        let recorded = fault
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        match recorded {
            Some(f) => Err(f),
            None => Ok(()),
        }
    }
}
