//! Application state shared across all handlers.

use std::sync::Arc;

use chancast_core::config::AppConfig;
use chancast_core::traits::auth::SessionResolver;
use chancast_core::traits::notify::{PushNotifier, WebhookNotifier};
use chancast_core::traits::storage::{MessageStore, ScheduledStore, StatsStore};
use chancast_realtime::engine::BroadcastEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Broadcast engine (hub, router, statistics).
    pub engine: Arc<BroadcastEngine>,
    /// Durable message storage collaborator.
    pub messages: Arc<dyn MessageStore>,
    /// Pending scheduled-set storage collaborator.
    pub scheduled: Arc<dyn ScheduledStore>,
    /// Statistics persistence collaborator.
    pub stats: Arc<dyn StatsStore>,
    /// Webhook sink collaborator.
    pub webhook: Arc<dyn WebhookNotifier>,
    /// Push-notification sink collaborator.
    pub push: Arc<dyn PushNotifier>,
    /// Session resolution collaborator.
    pub sessions: Arc<dyn SessionResolver>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}
