//! Integration tests for the publish, edit, delete, and reaction handlers.

use http::StatusCode;
use serde_json::json;

use chancast_core::traits::storage::{MessageStore, ScheduledStore};
use chancast_core::types::privilege::{Privilege, PrivilegeSet};

use crate::helpers::{TestApp, WRITER_TOKEN};

#[tokio::test]
async fn test_publish_requires_writer() {
    let app = TestApp::new();

    let (status, _) = app
        .request("POST", "/api/admin/new", None, Some(json!({"text": "hi"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_publish_persists_and_fans_out() {
    let app = TestApp::new();
    let (_listener, mut rx) = app.engine.hub().register(PrivilegeSet::reader());

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/new",
            Some(WRITER_TOKEN),
            Some(json!({"text": "first post"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["author"], "alice");
    assert_eq!(body["authorId"], "7");

    let stored = app.messages.message_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.text, "first post");

    let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "new-message");
    assert_eq!(frame["message"]["id"], 1);
}

#[tokio::test]
async fn test_future_timestamp_schedules_with_writer_preview() {
    let app = TestApp::new();
    let (_writer, mut writer_rx) = app
        .engine
        .hub()
        .register(PrivilegeSet::reader().with(Privilege::Writer));
    let (_reader, mut reader_rx) = app.engine.hub().register(PrivilegeSet::reader());

    let later = chrono::Utc::now() + chrono::Duration::hours(1);
    let (status, body) = app
        .request(
            "POST",
            "/api/admin/new",
            Some(WRITER_TOKEN),
            Some(json!({"text": "tomorrow", "timestamp": later})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    // No identity until promotion.
    assert_eq!(body["id"], 0);

    let pending = app.scheduled.load_pending().await.unwrap();
    assert_eq!(pending.messages.len(), 1);
    assert_eq!(pending.messages[0].text, "tomorrow");
    assert!(app.messages.is_empty());

    // Preview reaches writers only.
    let frame: serde_json::Value =
        serde_json::from_str(&writer_rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "new-message");
    assert_eq!(frame["message"]["text"], "tomorrow");
    assert!(reader_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_edit_and_delete_fan_out() {
    let app = TestApp::new();

    let (_, created) = app
        .request(
            "POST",
            "/api/admin/new",
            Some(WRITER_TOKEN),
            Some(json!({"text": "draft"})),
        )
        .await;

    let (_listener, mut rx) = app.engine.hub().register(PrivilegeSet::reader());

    let mut edited = created.clone();
    edited["text"] = json!("final");
    let (status, body) = app
        .request("POST", "/api/admin/edit-message", Some(WRITER_TOKEN), Some(edited))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let stored = app.messages.message_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.text, "final");
    assert!(stored.last_edit.is_some());

    let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "edit-message");
    assert_eq!(frame["message"]["text"], "final");

    let (status, body) = app
        .request("POST", "/api/admin/delete-message/1", Some(WRITER_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(app.messages.message_by_id(1).await.unwrap().unwrap().deleted);

    let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "delete-message");
    assert_eq!(frame["message"]["id"], 1);
    assert_eq!(frame["message"]["deleted"], true);
}

#[tokio::test]
async fn test_reaction_rereads_stored_message() {
    let app = TestApp::new();

    let (status, _) = app
        .request("POST", "/api/reactions", None, Some(json!({"messageId": 99})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.request(
        "POST",
        "/api/admin/new",
        Some(WRITER_TOKEN),
        Some(json!({"text": "react to me"})),
    )
    .await;

    let (_listener, mut rx) = app.engine.hub().register(PrivilegeSet::reader());
    let (status, body) = app
        .request("POST", "/api/reactions", None, Some(json!({"messageId": 1})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(frame["type"], "reaction");
    assert_eq!(frame["message"]["text"], "react to me");
}

#[tokio::test]
async fn test_pending_replace_rejects_stale_version() {
    let app = TestApp::new();

    let (status, body) = app
        .request("GET", "/api/admin/scheduled", Some(WRITER_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 0);

    let (status, _) = app
        .request(
            "POST",
            "/api/admin/scheduled",
            Some(WRITER_TOKEN),
            Some(json!({"messages": [], "version": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Replaying the same version must conflict.
    let (status, _) = app
        .request(
            "POST",
            "/api/admin/scheduled",
            Some(WRITER_TOKEN),
            Some(json!({"messages": [], "version": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
