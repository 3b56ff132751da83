mod common;

use churchbot::replies;
use churchbot::{MembershipReconciler, Reconciliation};
use churchbot_core::{MemberStatus, MembershipTransition};
use churchbot_storage::JsonStore;
use common::{chat, MockBot};
use std::sync::Arc;
use tempfile::TempDir;

fn transition(chat_id: i64, old: MemberStatus, new: MemberStatus) -> MembershipTransition {
    MembershipTransition {
        chat: chat(chat_id),
        old_status: old,
        new_status: new,
    }
}

async fn groups(dir: &TempDir) -> Arc<JsonStore<String>> {
    Arc::new(JsonStore::open(dir.path().join("groups.json")).await)
}

#[tokio::test]
async fn test_join_then_leave_round_trip() {
    let dir = TempDir::new().unwrap();
    let groups = groups(&dir).await;
    let bot = MockBot::new();
    let reconciler = MembershipReconciler::new(groups.clone(), bot.clone());

    let joined = reconciler
        .reconcile(&transition(-100, MemberStatus::Left, MemberStatus::Member))
        .await;
    assert_eq!(joined, Reconciliation::Registered);
    assert_eq!(groups.all().await, vec!["-100".to_string()]);
    assert_eq!(bot.sent_texts(), vec![replies::GROUP_AUTO_REGISTERED.to_string()]);
    assert_eq!(bot.sent()[0].chat_id, -100);

    let left = reconciler
        .reconcile(&transition(-100, MemberStatus::Member, MemberStatus::Left))
        .await;
    assert_eq!(left, Reconciliation::Removed);
    assert!(groups.all().await.is_empty());
    assert_eq!(bot.sent().len(), 1, "removal is silent");
}

#[tokio::test]
async fn test_promotion_does_not_duplicate_or_renotify() {
    let dir = TempDir::new().unwrap();
    let groups = groups(&dir).await;
    let bot = MockBot::new();
    let reconciler = MembershipReconciler::new(groups.clone(), bot.clone());

    reconciler
        .reconcile(&transition(-7, MemberStatus::Left, MemberStatus::Member))
        .await;
    let promoted = reconciler
        .reconcile(&transition(-7, MemberStatus::Member, MemberStatus::Administrator))
        .await;

    assert_eq!(promoted, Reconciliation::AlreadyRegistered);
    assert_eq!(groups.len().await, 1);
    assert_eq!(bot.sent().len(), 1);
}

#[tokio::test]
async fn test_notice_failure_still_registers() {
    let dir = TempDir::new().unwrap();
    let groups = groups(&dir).await;
    let bot = MockBot::failing_for(&[-55]);
    let reconciler = MembershipReconciler::new(groups.clone(), bot.clone());

    let result = reconciler
        .reconcile(&transition(-55, MemberStatus::Left, MemberStatus::Member))
        .await;

    assert_eq!(result, Reconciliation::Registered);
    assert!(groups.contains(&"-55".to_string()).await);
}

#[tokio::test]
async fn test_kick_of_unknown_group_and_ignored_statuses() {
    let dir = TempDir::new().unwrap();
    let groups = groups(&dir).await;
    let bot = MockBot::new();
    let reconciler = MembershipReconciler::new(groups.clone(), bot.clone());

    let kicked = reconciler
        .reconcile(&transition(-9, MemberStatus::Member, MemberStatus::Kicked))
        .await;
    assert_eq!(kicked, Reconciliation::NotRegistered);

    let restricted = reconciler
        .reconcile(&transition(-9, MemberStatus::Left, MemberStatus::Restricted))
        .await;
    assert_eq!(restricted, Reconciliation::Ignored);

    assert!(groups.is_empty().await);
    assert!(bot.sent().is_empty());
}
