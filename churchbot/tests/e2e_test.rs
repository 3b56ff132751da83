//! End-to-end: fresh data directory, full component wiring, updates dispatched through a mock bot,
//! state checked on disk.

mod common;

use churchbot::replies;
use churchbot::{build_bot_components, BotComponents, BotConfig};
use churchbot_core::{MemberStatus, MembershipTransition, Update};
use common::{callback, chat, command, message, MockBot};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const ADMIN: i64 = 1;

async fn read_json(path: &Path) -> Value {
    let raw = tokio::fs::read_to_string(path).await.expect("read data file");
    serde_json::from_str(&raw).expect("data file is valid JSON")
}

fn config(dir: &TempDir) -> BotConfig {
    let mut config = BotConfig::with_token("123:test", dir.path());
    config.base.admin_ids = vec![ADMIN.to_string()];
    config
}

async fn components(dir: &TempDir) -> (BotComponents, Arc<MockBot>) {
    let bot = MockBot::new();
    let components = build_bot_components(&config(dir), bot.clone())
        .await
        .expect("components build");
    (components, bot)
}

/// **Test: first run creates the four initial files as empty arrays.**
#[tokio::test]
async fn test_fresh_data_dir_is_initialized() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let bot = MockBot::new();
    build_bot_components(&BotConfig::with_token("123:test", &data), bot)
        .await
        .unwrap();

    for name in ["admins.json", "groups.json", "prayers.json", "events.json"] {
        assert_eq!(read_json(&data.join(name)).await, json!([]), "{}", name);
    }
}

#[tokio::test]
async fn test_configured_admins_are_seeded() {
    let dir = TempDir::new().unwrap();
    let _ = components(&dir).await;
    assert_eq!(read_json(&dir.path().join("admins.json")).await, json!(["1"]));
}

/// **Test: /addadmin twice stores the id once and the second reply says it is already there.**
#[tokio::test]
async fn test_addadmin_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (c, bot) = components(&dir).await;

    c.dispatcher
        .dispatch(Update::Command(command(ADMIN, "/addadmin 42")))
        .await;
    c.dispatcher
        .dispatch(Update::Command(command(ADMIN, "/addadmin 42")))
        .await;

    assert_eq!(
        read_json(&dir.path().join("admins.json")).await,
        json!(["1", "42"])
    );
    let texts = bot.sent_texts();
    assert_eq!(texts[0], "✅ Admin 42 added.");
    assert_eq!(texts[1], "ℹ️ Already an admin.");
}

#[tokio::test]
async fn test_non_admin_cannot_add_admin() {
    let dir = TempDir::new().unwrap();
    let (c, bot) = components(&dir).await;

    c.dispatcher
        .dispatch(Update::Command(command(99, "/addadmin 99")))
        .await;

    assert_eq!(bot.sent_texts(), vec![replies::UNAUTHORIZED.to_string()]);
    assert_eq!(read_json(&dir.path().join("admins.json")).await, json!(["1"]));
}

/// **Test: a manually added group disappears once the bot is removed from it.**
#[tokio::test]
async fn test_addgroup_then_bot_leaves() {
    let dir = TempDir::new().unwrap();
    let (c, _bot) = components(&dir).await;

    c.dispatcher
        .dispatch(Update::Command(command(ADMIN, "/addgroup 100")))
        .await;
    assert_eq!(read_json(&dir.path().join("groups.json")).await, json!(["100"]));

    c.dispatcher
        .dispatch(Update::Membership(MembershipTransition {
            chat: chat(100),
            old_status: MemberStatus::Member,
            new_status: MemberStatus::Left,
        }))
        .await;
    assert_eq!(read_json(&dir.path().join("groups.json")).await, json!([]));
}

#[tokio::test]
async fn test_broadcast_reports_partial_failure() {
    let dir = TempDir::new().unwrap();
    let bot = MockBot::failing_for(&[-200]);
    let c = build_bot_components(&config(&dir), bot.clone()).await.unwrap();
    for id in ["-100", "-200", "-300"] {
        c.stores.groups.add(id.to_string()).await;
    }

    c.dispatcher
        .dispatch(Update::Command(command(ADMIN, "/broadcast Sunday service at 9")))
        .await;

    let sent = bot.sent();
    let delivered: Vec<i64> = sent
        .iter()
        .filter(|s| s.text == "Sunday service at 9")
        .map(|s| s.chat_id)
        .collect();
    assert_eq!(delivered, vec![-100, -300]);
    assert_eq!(
        bot.last_text().unwrap(),
        replies::group_broadcast_report(2, 1)
    );
}

#[tokio::test]
async fn test_prayer_then_prayerlist() {
    let dir = TempDir::new().unwrap();
    let (c, bot) = components(&dir).await;

    c.dispatcher
        .dispatch(Update::Command(command(7, "/prayer for my family")))
        .await;
    c.dispatcher
        .dispatch(Update::Command(command(8, "/prayerlist")))
        .await;

    assert_eq!(
        read_json(&dir.path().join("prayers.json")).await,
        json!([{"user": "7", "text": "for my family"}])
    );
    assert_eq!(
        bot.sent_texts(),
        vec![
            replies::PRAYER_ADDED.to_string(),
            "🙏 Prayer Requests:\n- for my family (User 7)".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_plain_text_tracks_user_once() {
    let dir = TempDir::new().unwrap();
    let (c, bot) = components(&dir).await;

    c.dispatcher.dispatch(Update::Text(message(5, 5, "hello"))).await;
    c.dispatcher.dispatch(Update::Text(message(5, 5, "again"))).await;

    assert_eq!(read_json(&dir.path().join("users.json")).await, json!(["5"]));
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_events_are_added_listed_and_cleared() {
    let dir = TempDir::new().unwrap();
    let (c, bot) = components(&dir).await;

    c.dispatcher
        .dispatch(Update::Command(command(ADMIN, "/addevent Youth night Friday")))
        .await;
    c.dispatcher
        .dispatch(Update::Command(command(3, "/events")))
        .await;
    c.dispatcher
        .dispatch(Update::Command(command(ADMIN, "/clearevents")))
        .await;
    c.dispatcher
        .dispatch(Update::Command(command(3, "/events")))
        .await;

    let texts = bot.sent_texts();
    assert_eq!(texts[1], "📅 Upcoming Events:\nYouth night Friday");
    assert_eq!(texts[3], replies::EVENTS_EMPTY);
    assert_eq!(read_json(&dir.path().join("events.json")).await, json!([]));
}

#[tokio::test]
async fn test_quiz_round_with_default_questions() {
    let dir = TempDir::new().unwrap();
    let (c, bot) = components(&dir).await;

    c.dispatcher.dispatch(Update::Command(command(4, "/quiz"))).await;
    c.dispatcher.dispatch(Update::Callback(callback(4, 4, "C"))).await;
    c.dispatcher.dispatch(Update::Callback(callback(4, 4, "B"))).await;

    assert_eq!(bot.choices().len(), 2);
    assert_eq!(bot.answered().len(), 2);
    assert_eq!(bot.last_text().unwrap(), replies::quiz_finished(1, 2));
}

#[tokio::test]
async fn test_command_table_follows_feature_flags() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.features.translation = false;
    config.features.broadcast = false;
    let c = build_bot_components(&config, MockBot::new()).await.unwrap();
    let router = c.dispatcher.router();

    assert!(!router.has_command("tran"));
    assert!(!router.has_command("broadcast"));
    assert!(!router.has_command("broadcast_users"));
    assert!(router.has_command("quiz"));
    assert!(router.has_command("addadmin"));
    assert!(router.callback("A").is_some());
}
