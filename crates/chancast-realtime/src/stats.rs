//! Connection statistics tracker — live count, all-time peak, samples.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing::{info, warn};

use chancast_core::traits::storage::StatsStore;
use chancast_core::types::stats::PeakRecord;

/// Tracks the all-time peak concurrent-listener count.
///
/// The live count itself always derives from hub membership (the single
/// source of truth); this tracker only observes it. The peak update is a
/// check-then-act sequence guarded by its own mutex, distinct from the hub's
/// synchronization, and `value` never decreases.
///
/// Persistence runs on a dedicated task fed through a watch channel, so
/// saves are serialized in peak order and bursts coalesce to the newest
/// record.
pub struct StatsTracker {
    /// Statistics persistence collaborator.
    store: Arc<dyn StatsStore>,
    /// All-time peak record.
    peak: Mutex<PeakRecord>,
    /// Feed to the persistence task.
    persist_tx: watch::Sender<PeakRecord>,
}

impl fmt::Debug for StatsTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsTracker").finish()
    }
}

impl StatsTracker {
    /// Create a tracker starting from a zero peak.
    pub fn new(store: Arc<dyn StatsStore>, persist_timeout: Duration) -> Self {
        let (persist_tx, mut persist_rx) = watch::channel(PeakRecord::zero());

        let persist_store = Arc::clone(&store);
        tokio::spawn(async move {
            while persist_rx.changed().await.is_ok() {
                let record = *persist_rx.borrow_and_update();
                match time::timeout(persist_timeout, persist_store.save_peak(&record)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!(error = %e, "Failed to persist peak record"),
                    Err(_) => warn!("Timed out persisting peak record"),
                }
            }
        });

        Self {
            store,
            peak: Mutex::new(PeakRecord::zero()),
            persist_tx,
        }
    }

    /// Load the persisted peak at startup so the all-time maximum survives
    /// process restarts. Keeps whichever record is higher.
    pub async fn hydrate(&self) {
        match self.store.load_peak().await {
            Ok(Some(persisted)) => {
                let mut peak = self.peak_guard();
                if persisted.value > peak.value {
                    *peak = persisted;
                }
                info!(peak = peak.value, "Loaded persisted peak listener count");
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load persisted peak record"),
        }
    }

    /// Observe the live listener count after a membership change.
    ///
    /// If the count strictly exceeds the current peak, updates the record
    /// and hands it to the persistence task.
    pub fn sample(&self, live: u64) {
        let updated = {
            let mut peak = self.peak_guard();
            if live > peak.value {
                *peak = PeakRecord {
                    value: live,
                    timestamp: Utc::now(),
                };
                Some(*peak)
            } else {
                None
            }
        };

        if let Some(record) = updated {
            info!(peak = record.value, "New peak listener count");
            let _ = self.persist_tx.send(record);
        }
    }

    /// The current all-time peak.
    pub fn peak(&self) -> PeakRecord {
        *self.peak_guard()
    }

    fn peak_guard(&self) -> MutexGuard<'_, PeakRecord> {
        self.peak.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chancast_store::memory::MemoryStatsStore;

    use super::*;

    fn tracker(store: Arc<MemoryStatsStore>) -> StatsTracker {
        StatsTracker::new(store, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_peak_is_monotonic() {
        let tracker = tracker(Arc::new(MemoryStatsStore::new()));
        for count in [1u64, 3, 2, 5, 4] {
            tracker.sample(count);
        }
        assert_eq!(tracker.peak().value, 5);
    }

    #[tokio::test]
    async fn test_peak_persisted_and_survives_restart() {
        let store = Arc::new(MemoryStatsStore::new());
        {
            let tracker = tracker(Arc::clone(&store));
            tracker.sample(7);
            // Wait for the persistence task to catch up.
            for _ in 0..100 {
                if let Ok(Some(peak)) = store.load_peak().await {
                    if peak.value == 7 {
                        break;
                    }
                }
                time::sleep(Duration::from_millis(10)).await;
            }
        }
        assert_eq!(store.load_peak().await.unwrap().unwrap().value, 7);

        let restarted = tracker(Arc::clone(&store));
        restarted.hydrate().await;
        assert_eq!(restarted.peak().value, 7);

        // A lower observed count after restart must not lower the record.
        restarted.sample(3);
        assert_eq!(restarted.peak().value, 7);
    }
}
