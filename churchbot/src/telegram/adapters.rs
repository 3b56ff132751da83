//! Conversions from teloxide types to core types.

use churchbot_core::{
    CallbackQuery, Chat, MemberStatus, MembershipTransition, Message, ToCoreMessage, ToCoreUser,
    User,
};
use teloxide::types::ChatMemberStatus;

pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

pub fn chat_to_core(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
        title: chat.title().map(str::to_string),
    }
}

pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<Message> {
        let from = self.0.from.as_ref()?;
        let reply = self.0.reply_to_message();
        Some(Message {
            id: self.0.id.0.to_string(),
            user: TelegramUserWrapper(from).to_core(),
            chat: chat_to_core(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            created_at: self.0.date,
            reply_to_message_id: reply.map(|m| m.id.0.to_string()),
            reply_to_message_content: reply.and_then(|m| m.text()).map(str::to_string),
        })
    }
}

pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    pub fn to_core(&self) -> CallbackQuery {
        let q = self.0;
        CallbackQuery {
            id: q.id.0.clone(),
            user: TelegramUserWrapper(&q.from).to_core(),
            chat: q.message.as_ref().map(|m| chat_to_core(m.chat())),
            message_id: q.message.as_ref().map(|m| m.id().0.to_string()),
            data: q.data.clone().unwrap_or_default(),
        }
    }
}

pub fn member_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Owner,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Kicked,
    }
}

/// The bot's own membership change (`my_chat_member`).
pub struct TelegramMembershipWrapper<'a>(pub &'a teloxide::types::ChatMemberUpdated);

impl<'a> TelegramMembershipWrapper<'a> {
    pub fn to_core(&self) -> MembershipTransition {
        let upd = self.0;
        MembershipTransition {
            chat: chat_to_core(&upd.chat),
            old_status: member_status(upd.old_chat_member.status()),
            new_status: member_status(upd.new_chat_member.status()),
        }
    }
}
