//! `/tran`: translates inline text or the replied-to message.

use async_trait::async_trait;
use churchbot_core::{Command, Handler, HandlerError, HandlerResponse, Result};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::replies;
use crate::translate::{parse_tran_args, Translator};

pub struct TranslateHandler {
    translator: Arc<dyn Translator>,
}

impl TranslateHandler {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }
}

#[async_trait]
impl Handler for TranslateHandler {
    #[instrument(skip(self, command))]
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        let reply_text = command.message.reply_to_message_content.as_deref();
        let Some((text, target)) = parse_tran_args(&command.args, reply_text) else {
            return Err(HandlerError::InvalidArguments(replies::TRAN_USAGE.to_string()).into());
        };

        match self.translator.translate(&text, target.as_deref()).await {
            Ok(translated) => {
                info!(
                    user_id = command.message.user.id,
                    target_lang = ?target,
                    "Translation done"
                );
                Ok(HandlerResponse::Reply(replies::translation(&text, &translated)))
            }
            Err(e) => {
                error!(error = %e, user_id = command.message.user.id, "Translation failed");
                Ok(HandlerResponse::Reply(replies::TRAN_FAILED.to_string()))
            }
        }
    }
}
