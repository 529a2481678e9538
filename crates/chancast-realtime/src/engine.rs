//! Top-level broadcast engine that ties the realtime subsystems together.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use chancast_core::config::realtime::RealtimeConfig;
use chancast_core::traits::storage::StatsStore;
use chancast_core::types::privilege::PrivilegeSet;

use crate::hub::Hub;
use crate::metrics::FanoutMetrics;
use crate::router::EventRouter;
use crate::session::SseSession;
use crate::stats::StatsTracker;

/// Central engine coordinating the hub, fan-out router, and statistics.
#[derive(Debug)]
pub struct BroadcastEngine {
    /// Subscriber registry.
    hub: Arc<Hub>,
    /// Fan-out router.
    router: Arc<EventRouter>,
    /// Statistics tracker.
    stats: Arc<StatsTracker>,
    /// Fan-out counters.
    metrics: Arc<FanoutMetrics>,
    /// Heartbeat cadence for new sessions.
    heartbeat_interval: Duration,
}

impl BroadcastEngine {
    /// Create the engine and all subsystems.
    pub fn new(config: &RealtimeConfig, stats_store: Arc<dyn StatsStore>) -> Self {
        let stats = Arc::new(StatsTracker::new(
            stats_store,
            Duration::from_secs(config.persist_timeout_seconds),
        ));
        let metrics = Arc::new(FanoutMetrics::new());
        let hub = Arc::new(Hub::new(config.queue_capacity, Arc::clone(&stats)));
        let router = Arc::new(EventRouter::new(Arc::clone(&hub), Arc::clone(&metrics)));

        info!("Broadcast engine initialized");

        Self {
            hub,
            router,
            stats,
            metrics,
            heartbeat_interval: Duration::from_secs(config.heartbeat_interval_seconds),
        }
    }

    /// Load persisted statistics state (the all-time peak).
    pub async fn hydrate(&self) {
        self.stats.hydrate().await;
    }

    /// Open a streaming session for a connecting client.
    ///
    /// The privilege snapshot is fixed for the life of the session; a
    /// privilege change takes effect only on reconnect.
    pub fn connect(&self, privileges: PrivilegeSet) -> SseSession {
        SseSession::connect(Arc::clone(&self.hub), privileges, self.heartbeat_interval)
    }

    /// The subscriber registry.
    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// The fan-out router.
    pub fn router(&self) -> &Arc<EventRouter> {
        &self.router
    }

    /// The statistics tracker.
    pub fn stats(&self) -> &Arc<StatsTracker> {
        &self.stats
    }

    /// The fan-out counters.
    pub fn metrics(&self) -> &Arc<FanoutMetrics> {
        &self.metrics
    }

    /// Close every active session (graceful shutdown).
    pub fn shutdown(&self) {
        info!("Shutting down broadcast engine");
        self.hub.close_all();
    }
}
