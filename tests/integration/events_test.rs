//! Integration tests for the SSE connect endpoint.

use std::time::Duration;

use axum::body::Body;
use chrono::Utc;
use futures::StreamExt;
use http::{Request, StatusCode};
use tower::ServiceExt;

use chancast_core::types::message::ChannelMessage;
use chancast_realtime::push::PushKind;

use crate::helpers;

async fn open_stream(
    app: &helpers::TestApp,
    token: Option<&str>,
) -> http::Response<axum::body::Body> {
    let mut builder = Request::builder().uri("/api/events");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_stream_emits_heartbeat_then_pushes() {
    let app = helpers::TestApp::new();
    let response = open_stream(&app, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/event-stream"
    );
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-cache");
    assert_eq!(response.headers().get("x-accel-buffering").unwrap(), "no");

    let mut frames = response.into_body().into_data_stream();

    let first = frames.next().await.unwrap().unwrap();
    assert_eq!(&first[..], b"data: {\"type\": \"heartbeat\"}\n\n");

    let message = ChannelMessage::new("text", "alice", "7", Utc::now(), "hello");
    app.engine.router().deliver(PushKind::NewMessage, &message);

    let second = frames.next().await.unwrap().unwrap();
    let text = std::str::from_utf8(&second).unwrap();
    assert!(text.starts_with("data: {\"type\":\"new-message\""));
    assert!(text.contains("\"text\":\"hello\""));
    assert!(text.ends_with("\n\n"));
}

#[tokio::test]
async fn test_disconnect_unregisters_listener() {
    let app = helpers::TestApp::new();

    let response = open_stream(&app, None).await;
    assert_eq!(app.engine.hub().count(), 1);

    // Client goes away: dropping the body ends the session.
    drop(response);
    assert_eq!(app.engine.hub().count(), 0);
}

#[tokio::test]
async fn test_privilege_snapshot_filters_scheduling_preview() {
    let app = helpers::TestApp::new();

    let writer_response = open_stream(&app, Some(helpers::WRITER_TOKEN)).await;
    let reader_response = open_stream(&app, None).await;

    let mut writer_frames = writer_response.into_body().into_data_stream();
    let mut reader_frames = reader_response.into_body().into_data_stream();

    // Consume the connect heartbeats.
    writer_frames.next().await.unwrap().unwrap();
    reader_frames.next().await.unwrap().unwrap();

    let message = ChannelMessage::new("text", "alice", "7", Utc::now(), "preview");
    app.engine
        .router()
        .deliver(PushKind::MessageBeforeScheduling, &message);

    let to_writer = writer_frames.next().await.unwrap().unwrap();
    let text = std::str::from_utf8(&to_writer).unwrap();
    assert!(text.contains("\"text\":\"preview\""));

    // The reader stream stays silent (no frame before the next heartbeat).
    let silent =
        tokio::time::timeout(Duration::from_millis(100), reader_frames.next()).await;
    assert!(silent.is_err());
}
