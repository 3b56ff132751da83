//! Bot configuration: BaseConfig (Telegram + log + data) + SessionConfig (retry/timeouts/proxy) + Features.

mod base;
mod bot_config;
mod features;
mod session;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use features::Features;
pub use session::{SessionConfig, LONG_POLL_TIMEOUT};
