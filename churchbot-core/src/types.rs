//! Core types: user, chat, message, command, callback, membership transition, and handler traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (group, channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
    pub title: Option<String>,
}

/// A single inbound message with user, chat, content, and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// Text of the replied-to message; `/tran` translates it when present.
    pub reply_to_message_content: Option<String>,
}

impl Message {
    /// True when the text starts with a `/` command prefix.
    pub fn is_command(&self) -> bool {
        self.content.trim_start().starts_with('/')
    }
}

/// A parsed `/name@bot arg1 arg2` command together with the message that carried it.
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
    /// Bot username from a `/name@bot` suffix, without the `@`.
    pub addressee: Option<String>,
    pub message: Message,
}

impl Command {
    /// Parses the message text as a command. Returns `None` for plain text.
    /// A `@botname` suffix on the command name goes to `addressee`; names are lowercased.
    pub fn parse(message: Message) -> Option<Self> {
        let text = message.content.trim();
        let rest = text.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let head = parts.next()?;
        let (name, addressee) = match head.split_once('@') {
            Some((name, bot)) => (name, Some(bot).filter(|b| !b.is_empty())),
            None => (head, None),
        };
        let name = name.to_lowercase();
        if name.is_empty() {
            return None;
        }
        let addressee = addressee.map(str::to_string);
        let args = parts.map(str::to_string).collect();
        Some(Self {
            name,
            args,
            addressee,
            message,
        })
    }

    /// True unless the command names a different bot. Usernames compare case-insensitively.
    pub fn is_addressed_to(&self, bot_username: &str) -> bool {
        match &self.addressee {
            Some(name) => name.eq_ignore_ascii_case(bot_username),
            None => true,
        }
    }

    /// Raw text after the command name, trimmed (free-text commands such as `/prayer`).
    /// Inner whitespace and line breaks are kept.
    pub fn arg_text(&self) -> String {
        let text = self.message.content.trim();
        match text.find(char::is_whitespace) {
            Some(i) => text[i..].trim().to_string(),
            None => String::new(),
        }
    }

    /// First argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Caller id in the string form used by the id stores.
    pub fn caller_id(&self) -> String {
        self.message.user.id.to_string()
    }

    pub fn chat_id(&self) -> i64 {
        self.message.chat.id
    }
}

/// Press of an inline choice button.
#[derive(Debug, Clone)]
pub struct CallbackQuery {
    pub id: String,
    pub user: User,
    /// Chat of the message carrying the keyboard; absent for inline-mode messages.
    pub chat: Option<Chat>,
    pub message_id: Option<String>,
    /// Opaque payload attached to the pressed button.
    pub data: String,
}

/// The bot's standing in a chat, as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl MemberStatus {
    /// Statuses in which the bot can post into the chat and should be registered.
    pub fn is_present(&self) -> bool {
        matches!(self, MemberStatus::Member | MemberStatus::Administrator)
    }

    /// Statuses in which the bot is gone from the chat.
    pub fn is_gone(&self) -> bool {
        matches!(self, MemberStatus::Left | MemberStatus::Kicked)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberStatus::Owner => "creator",
            MemberStatus::Administrator => "administrator",
            MemberStatus::Member => "member",
            MemberStatus::Restricted => "restricted",
            MemberStatus::Left => "left",
            MemberStatus::Kicked => "kicked",
        };
        f.write_str(s)
    }
}

/// Notification that the bot's standing in a chat changed.
#[derive(Debug, Clone)]
pub struct MembershipTransition {
    pub chat: Chat,
    pub old_status: MemberStatus,
    pub new_status: MemberStatus,
}

/// Every inbound event the dispatcher understands.
#[derive(Debug, Clone)]
pub enum Update {
    Command(Command),
    Callback(CallbackQuery),
    /// Non-command text.
    Text(Message),
    Membership(MembershipTransition),
}

impl Update {
    /// Classifies a message as command or plain text.
    pub fn from_message(message: Message) -> Self {
        if message.is_command() {
            match Command::parse(message.clone()) {
                Some(command) => Update::Command(command),
                None => Update::Text(message),
            }
        } else {
            Update::Text(message)
        }
    }
}

/// One inline keyboard button: visible label and the payload sent back on press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceButton {
    pub label: String,
    pub payload: String,
}

/// Result of a command handler. `Reply(text)` is sent back to the invoking chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Reply to the invoking chat with this text.
    Reply(String),
    /// Handled; the handler already talked to the gateway itself.
    Stop,
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`]. `None` when the message has
/// no sending user (channel posts, anonymous admins), since every core message carries a caller.
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Option<Message>;
}

/// Handles one routed command.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, command: &Command) -> crate::error::Result<HandlerResponse>;
}

/// Handles one routed callback query (inline button press).
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn handle(&self, query: &CallbackQuery) -> crate::error::Result<()>;
}
