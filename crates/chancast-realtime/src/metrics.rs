//! Fan-out engine metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Engine-level fan-out counters.
#[derive(Debug, Default)]
pub struct FanoutMetrics {
    /// Total fan-out passes.
    pub fanouts: AtomicU64,
    /// Total payloads enqueued to listeners.
    pub delivered: AtomicU64,
    /// Total payloads dropped (full or closed listener queues).
    pub dropped: AtomicU64,
}

impl FanoutMetrics {
    /// Create new zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fan-out pass with its delivery counts.
    pub fn record_fanout(&self, delivered: u64, dropped: u64) {
        self.fanouts.fetch_add(1, Ordering::Relaxed);
        self.delivered.fetch_add(delivered, Ordering::Relaxed);
        self.dropped.fetch_add(dropped, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> FanoutSnapshot {
        FanoutSnapshot {
            fanouts: self.fanouts.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FanoutSnapshot {
    /// Total fan-out passes.
    pub fanouts: u64,
    /// Total payloads enqueued.
    pub delivered: u64,
    /// Total payloads dropped.
    pub dropped: u64,
}
