//! Integration tests for scheduled-message promotion.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use chancast_core::error::AppError;
use chancast_core::result::AppResult;
use chancast_core::traits::storage::{MessageStore, ScheduledStore};
use chancast_core::types::message::ChannelMessage;
use chancast_core::types::privilege::{Privilege, PrivilegeSet};
use chancast_core::types::scheduled::PendingScheduled;
use chancast_store::{LogPushNotifier, LogWebhookNotifier};
use chancast_worker::ScheduledPromoter;

use crate::helpers::{TestApp, wait_for};

fn promoter_for(app: &TestApp) -> Arc<ScheduledPromoter> {
    Arc::new(ScheduledPromoter::new(
        app.messages.clone(),
        app.scheduled.clone(),
        Arc::clone(app.engine.router()),
        Arc::new(LogWebhookNotifier::new()),
        Arc::new(LogPushNotifier::new()),
        Duration::from_secs(5),
    ))
}

fn scheduled(text: &str, offset: ChronoDuration) -> ChannelMessage {
    ChannelMessage::new("text", "alice", "7", Utc::now() + offset, text)
}

#[tokio::test]
async fn test_due_message_promoted_exactly_once() {
    let app = TestApp::new();
    let now = Utc::now();
    app.scheduled
        .seed(vec![
            scheduled("due", ChronoDuration::seconds(-1)),
            scheduled("later", ChronoDuration::hours(1)),
        ])
        .await;

    let (_reader, mut reader_rx) = app.engine.hub().register(PrivilegeSet::reader());
    let (_writer, mut writer_rx) = app
        .engine
        .hub()
        .register(PrivilegeSet::reader().with(Privilege::Writer));

    let promoter = promoter_for(&app);
    Arc::clone(&promoter).run_tick().await;

    // The not-due remainder replaced the pending set wholesale.
    let pending = app.scheduled.load_pending().await.unwrap();
    assert_eq!(pending.messages.len(), 1);
    assert_eq!(pending.messages[0].text, "later");

    // The due message was persisted with a fresh identity and "now"
    // timestamp, attributed to the system placeholder.
    assert!(wait_for(|| app.messages.len() == 1, Duration::from_secs(1)).await);
    let promoted = app.messages.message_by_id(1).await.unwrap().unwrap();
    assert_eq!(promoted.text, "due");
    assert_eq!(promoted.author, "Scheduled");
    assert_eq!(promoted.author_id, "0");
    assert!(promoted.timestamp >= now);

    // Promoted posts fan out as new-message to non-writers only.
    let frame: serde_json::Value =
        serde_json::from_str(&reader_rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "new-message");
    assert_eq!(frame["message"]["text"], "due");
    assert!(writer_rx.try_recv().is_err());

    // A second tick finds nothing due.
    Arc::clone(&promoter).run_tick().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(app.messages.len(), 1);
}

#[tokio::test]
async fn test_quiet_tick_leaves_pending_set_untouched() {
    let app = TestApp::new();
    app.scheduled
        .seed(vec![scheduled("later", ChronoDuration::hours(1))])
        .await;
    let before = app.scheduled.load_pending().await.unwrap();

    promoter_for(&app).run_tick().await;

    let after = app.scheduled.load_pending().await.unwrap();
    assert_eq!(after.version, before.version);
    assert_eq!(after.messages.len(), 1);
}

struct FailingScheduledStore;

#[async_trait]
impl ScheduledStore for FailingScheduledStore {
    async fn load_pending(&self) -> AppResult<PendingScheduled> {
        Err(AppError::storage("scheduled backend unavailable"))
    }

    async fn save_pending(&self, _: Vec<ChannelMessage>, _: u64) -> AppResult<bool> {
        Err(AppError::storage("scheduled backend unavailable"))
    }
}

#[tokio::test]
async fn test_failed_load_skips_whole_tick() {
    let app = TestApp::new();
    let promoter = Arc::new(ScheduledPromoter::new(
        app.messages.clone(),
        Arc::new(FailingScheduledStore),
        Arc::clone(app.engine.router()),
        Arc::new(LogWebhookNotifier::new()),
        Arc::new(LogPushNotifier::new()),
        Duration::from_secs(5),
    ));

    promoter.run_tick().await;

    // No partial processing.
    assert!(app.messages.is_empty());
}
