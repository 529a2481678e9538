//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use chancast_api::{AppState, build_router};
use chancast_core::config::AppConfig;
use chancast_core::traits::auth::AuthContext;
use chancast_core::types::privilege::{Privilege, PrivilegeSet};
use chancast_realtime::BroadcastEngine;
use chancast_store::{
    LogPushNotifier, LogWebhookNotifier, MemoryMessageStore, MemoryScheduledStore,
    MemoryStatsStore, StaticSessionResolver,
};

/// Bearer token resolving to a Writer context.
pub const WRITER_TOKEN: &str = "writer-token";

/// Bearer token resolving to a full-privilege context.
pub const ADMIN_TOKEN: &str = "admin-token";

/// Test application context over the in-memory collaborators.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// The broadcast engine, for direct hub/router access.
    pub engine: Arc<BroadcastEngine>,
    /// In-memory message store.
    pub messages: Arc<MemoryMessageStore>,
    /// In-memory pending scheduled set.
    pub scheduled: Arc<MemoryScheduledStore>,
    /// In-memory statistics store.
    pub stats: Arc<MemoryStatsStore>,
    /// Application config.
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let config = Arc::new(AppConfig::default());

        let messages = Arc::new(MemoryMessageStore::new());
        let scheduled = Arc::new(MemoryScheduledStore::new());
        let stats = Arc::new(MemoryStatsStore::new());

        let stats_store: Arc<dyn chancast_core::traits::storage::StatsStore> = stats.clone();
        let engine = Arc::new(BroadcastEngine::new(&config.realtime, stats_store));

        let sessions = StaticSessionResolver::new()
            .with_token(
                WRITER_TOKEN,
                AuthContext {
                    user_id: "7".to_string(),
                    name: "alice".to_string(),
                    privileges: PrivilegeSet::reader().with(Privilege::Writer),
                },
            )
            .with_token(
                ADMIN_TOKEN,
                AuthContext {
                    user_id: "1".to_string(),
                    name: "root".to_string(),
                    privileges: PrivilegeSet::reader()
                        .with(Privilege::Writer)
                        .with(Privilege::Moderator)
                        .with(Privilege::Admin),
                },
            );

        let state = AppState {
            config: Arc::clone(&config),
            engine: Arc::clone(&engine),
            messages: messages.clone(),
            scheduled: scheduled.clone(),
            stats: stats.clone(),
            webhook: Arc::new(LogWebhookNotifier::new()),
            push: Arc::new(LogPushNotifier::new()),
            sessions: Arc::new(sessions),
        };

        Self {
            router: build_router(state),
            engine,
            messages,
            scheduled,
            stats,
            config,
        }
    }

    /// Send one request and collect the JSON response body.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body was not JSON")
        };

        (status, json)
    }
}

/// Poll a condition until it holds or the timeout elapses.
pub async fn wait_for<F: Fn() -> bool>(condition: F, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
