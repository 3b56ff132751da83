//! Telegram binding: teloxide → core conversions, the [`churchbot_core::Bot`] implementation,
//! HTTP client setup, and the long-polling [`crate::session::Gateway`].

mod adapters;
mod bot_adapter;
mod client;
mod gateway;

pub use adapters::{
    chat_to_core, member_status, TelegramCallbackWrapper, TelegramMembershipWrapper,
    TelegramMessageWrapper, TelegramUserWrapper,
};
pub use bot_adapter::{map_request_error, TelegramBotAdapter};
pub use client::build_teloxide_bot;
pub use gateway::{classify_request_error, TelegramGateway};
