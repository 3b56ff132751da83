//! # churchbot-core
//!
//! Core types and traits for the church community bot: [`Bot`], [`Handler`], [`CallbackHandler`],
//! inbound [`Update`] variants, the error taxonomy, and tracing initialization.
//! Transport-agnostic; the Telegram binding lives in the `churchbot` crate.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_stdout_tracing, init_tracing};
pub use types::{
    CallbackHandler, CallbackQuery, Chat, ChoiceButton, Command, Handler, HandlerResponse,
    MemberStatus, MembershipTransition, Message, ToCoreMessage, ToCoreUser, Update, User,
};
