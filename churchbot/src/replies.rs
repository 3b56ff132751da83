//! Reply copy shown to chat users.

pub const WELCOME: &str = "👋 Welcome to Church Community Bot!";
pub const COMMAND_LIST: &str = "Available commands:\n\
    /verse\n/prayer <text>\n/prayerlist\n/events\n/daily_inspiration\n/myid\n/chatid\n/tran\n/quiz";
pub const VERSE: &str = "📖 Today's verse: John 3:16";
pub const DAILY_INSPIRATION: &str = "✨ Daily inspiration: Keep the faith strong!";

pub const PRAYER_USAGE: &str = "🙏 Please share your prayer request.";
pub const PRAYER_ADDED: &str = "✅ Prayer request added.";
pub const PRAYER_LIST_EMPTY: &str = "🙏 Prayer list is empty.";
pub const PRAYER_LIST_HEADER: &str = "🙏 Prayer Requests:\n";

pub const EVENTS_EMPTY: &str = "📅 No upcoming events.";
pub const EVENTS_HEADER: &str = "📅 Upcoming Events:\n";
pub const EVENT_USAGE: &str = "⚠️ Provide event details. Usage: /addevent <text>";
pub const EVENT_ADDED: &str = "✅ Event added.";
pub const EVENTS_CLEARED: &str = "🗑️ All events cleared.";

pub const TRAN_USAGE: &str = "⚠️ ဘာသာပြန်လိုတဲ့ စာသားကို ထည့်ပါ။\n\
    Usage: /tran <text> [target_lang] or reply to a message with /tran";
pub const TRAN_FAILED: &str = "❌ Translation failed.\nဘာသာပြန်မအောင်မြင်ပါ။";

pub const UNAUTHORIZED: &str = "⛔ You are not authorized to use this command.";
pub const INTERNAL_ERROR: &str = "⚠️ Something went wrong. Please try again later.";

pub const BROADCAST_USAGE: &str = "⚠️ Provide a message to broadcast. Usage: /broadcast <message>";
pub const BROADCAST_USERS_USAGE: &str =
    "⚠️ Provide a message to broadcast. Usage: /broadcast_users <message>";

pub const GROUP_AUTO_REGISTERED: &str = "✅ Group registered automatically.";

pub const QUIZ_EMPTY: &str = "No quiz questions available.";
pub const QUIZ_FINISHED_ALREADY: &str = "Quiz already finished.";

pub fn your_user_id(id: i64) -> String {
    format!("Your user ID: {}", id)
}

pub fn chat_id(id: i64) -> String {
    format!("Chat ID: {}", id)
}

pub fn translation(original: &str, translated: &str) -> String {
    format!("🌐 Translation:\nOriginal: {}\nTranslated: {}", original, translated)
}

pub fn group_broadcast_report(delivered: usize, failed: usize) -> String {
    format!(
        "📢 Broadcast complete.\n✅ Success: {}, ❌ Fail: {}",
        delivered, failed
    )
}

pub fn user_broadcast_report(delivered: usize, failed: usize) -> String {
    format!(
        "📢 User broadcast complete.\n✅ Success: {}, ❌ Fail: {}",
        delivered, failed
    )
}

pub fn quiz_correct(choice: &str) -> String {
    format!("✅ Correct! You chose {}.", choice)
}

pub fn quiz_wrong(choice: &str, answer: &str) -> String {
    format!("❌ Wrong. You chose {}. Correct: {}", choice, answer)
}

pub fn quiz_finished(score: usize, total: usize) -> String {
    format!("🎯 Quiz finished! Score: {}/{}", score, total)
}

/// Copy for one id-set management command family (admins or groups).
#[derive(Clone, Copy)]
pub struct RosterCopy {
    pub add_usage: &'static str,
    pub added: fn(&str) -> String,
    pub already_present: &'static str,
    pub list_empty: &'static str,
    pub list_header: &'static str,
    pub remove_usage: &'static str,
    pub removed: fn(&str) -> String,
    pub not_found: &'static str,
}

fn admin_added(id: &str) -> String {
    format!("✅ Admin {} added.", id)
}

fn admin_removed(id: &str) -> String {
    format!("❌ Admin {} removed.", id)
}

fn group_added(id: &str) -> String {
    format!("✅ Group {} added.\nGroup {} ထည့်ပြီးပါပြီ။", id, id)
}

fn group_removed(id: &str) -> String {
    format!("❌ Group {} removed.\nGroup {} ဖယ်ရှားပြီးပါပြီ။", id, id)
}

pub const ADMIN_COPY: RosterCopy = RosterCopy {
    add_usage: "⚠️ Provide a user ID. Usage: /addadmin <user_id>",
    added: admin_added,
    already_present: "ℹ️ Already an admin.",
    list_empty: "No admins yet.",
    list_header: "Admins:\n",
    remove_usage: "⚠️ Provide a user ID to remove. Usage: /deladmin <user_id>",
    removed: admin_removed,
    not_found: "User not found in admins.",
};

pub const GROUP_COPY: RosterCopy = RosterCopy {
    add_usage: "⚠️ Provide a group ID.\nUsage: /addgroup <group_id>",
    added: group_added,
    already_present: "ℹ️ Already in group list.\nGroup စာရင်းထဲတွင် ရှိပြီးသားပါ။",
    list_empty: "No groups yet.\nGroup မရှိသေးပါ။",
    list_header: "Groups:\n",
    remove_usage: "⚠️ Provide a group ID to remove.\nUsage: /delgroup <group_id>",
    removed: group_removed,
    not_found: "Group not found.\nGroup မတွေ့ပါ။",
};
