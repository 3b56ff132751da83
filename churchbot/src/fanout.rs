//! Broadcast fan-out: one message to every recipient, sequentially, counting failures.

use churchbot_core::{Bot, BotError};
use std::fmt;
use tracing::{info, warn};

/// Which recipient store a broadcast targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Groups,
    Users,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Groups => f.write_str("groups"),
            Audience::Users => f.write_str("users"),
        }
    }
}

/// Outcome of a fan-out. `delivered + failed` equals the number of recipients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    pub delivered: usize,
    pub failed: usize,
}

impl FanoutReport {
    pub fn total(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Sends `text` to each recipient in order. A failing recipient (unparseable id, blocked bot,
/// unknown chat, network error) is logged and counted; the loop never stops early.
pub async fn fan_out(
    bot: &dyn Bot,
    audience: Audience,
    recipients: &[String],
    text: &str,
) -> FanoutReport {
    let mut report = FanoutReport::default();
    for recipient in recipients {
        let sent = match recipient.trim().parse::<i64>() {
            Ok(chat_id) => bot.send_message(chat_id, text).await,
            Err(_) => Err(BotError::Delivery(format!(
                "Recipient id is not numeric: {}",
                recipient
            ))),
        };
        match sent {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                warn!(
                    audience = %audience,
                    recipient = %recipient,
                    error = %e,
                    "Broadcast delivery failed"
                );
            }
        }
    }
    info!(
        audience = %audience,
        delivered = report.delivered,
        failed = report.failed,
        "Broadcast finished"
    );
    report
}
