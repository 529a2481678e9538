//! Subscriber registry (hub) — the set of active listeners.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use chancast_core::types::privilege::PrivilegeSet;

use crate::listener::{Listener, ListenerId};
use crate::stats::StatsTracker;

/// Thread-safe registry of active listeners.
///
/// Membership changes and fan-out snapshots are individually atomic; the
/// fan-out itself operates on a snapshot so that no single slow recipient
/// can block registration, unregistration, or delivery to other listeners.
/// The live listener count derives from registry membership only.
#[derive(Debug)]
pub struct Hub {
    /// Listener identity → handle.
    listeners: DashMap<ListenerId, Arc<Listener>>,
    /// Statistics tracker, re-sampled on every membership change.
    stats: Arc<StatsTracker>,
    /// Outbound queue depth for new listeners.
    queue_capacity: usize,
}

impl Hub {
    /// Create an empty hub.
    pub fn new(queue_capacity: usize, stats: Arc<StatsTracker>) -> Self {
        Self {
            listeners: DashMap::new(),
            stats,
            queue_capacity,
        }
    }

    /// Register a new listener with the given privilege snapshot.
    ///
    /// Each call adds one membership. Returns the listener handle and the
    /// receiver side of its outbound queue.
    pub fn register(&self, privileges: PrivilegeSet) -> (Arc<Listener>, mpsc::Receiver<String>) {
        let (listener, rx) = Listener::new(privileges, self.queue_capacity);
        let listener = Arc::new(listener);
        self.listeners.insert(listener.id(), Arc::clone(&listener));

        self.stats.sample(self.listeners.len() as u64);
        debug!(listener_id = %listener.id(), count = self.listeners.len(), "Listener registered");

        (listener, rx)
    }

    /// Remove a listener and close it.
    ///
    /// After this returns, no in-flight fan-out can enqueue into the
    /// listener. Unregistering an unknown id is a no-op, so a
    /// double-unregister is harmless.
    pub fn unregister(&self, id: ListenerId) {
        if let Some((_, listener)) = self.listeners.remove(&id) {
            listener.close();
            self.stats.sample(self.listeners.len() as u64);
            debug!(listener_id = %id, count = self.listeners.len(), "Listener unregistered");
        }
    }

    /// Current live membership size.
    pub fn count(&self) -> usize {
        self.listeners.len()
    }

    /// Snapshot of the current listener set, for one fan-out pass.
    pub fn snapshot(&self) -> Vec<Arc<Listener>> {
        self.listeners.iter().map(|entry| Arc::clone(entry.value())).collect()
    }

    /// Unregister and close every listener (graceful shutdown).
    pub fn close_all(&self) {
        let ids: Vec<ListenerId> = self.listeners.iter().map(|entry| *entry.key()).collect();
        let count = ids.len();
        for id in ids {
            self.unregister(id);
        }
        if count > 0 {
            info!(count, "All listeners closed");
        }
    }
}
