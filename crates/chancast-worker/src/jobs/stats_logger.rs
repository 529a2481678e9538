//! Connection-statistics logger.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time;
use tracing::{debug, warn};

use chancast_core::traits::storage::StatsStore;
use chancast_core::types::stats::ConnectionSample;
use chancast_realtime::hub::Hub;

/// Periodically persists the live listener count as a timeseries point,
/// skipping ticks where the count has not changed since the last sample.
pub struct StatsLogger {
    /// Subscriber registry — the single source of truth for the live count.
    hub: Arc<Hub>,
    /// Statistics persistence collaborator.
    store: Arc<dyn StatsStore>,
    /// Count observed at the previous tick.
    last: Mutex<u64>,
    /// Timeout per persistence call.
    persist_timeout: Duration,
}

impl fmt::Debug for StatsLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsLogger").finish()
    }
}

impl StatsLogger {
    /// Create the logger.
    pub fn new(hub: Arc<Hub>, store: Arc<dyn StatsStore>, persist_timeout: Duration) -> Self {
        Self {
            hub,
            store,
            last: Mutex::new(0),
            persist_timeout,
        }
    }

    /// Run one logger tick.
    pub async fn run_once(&self) {
        let count = self.hub.count() as u64;
        let last = *self.last.lock().unwrap_or_else(PoisonError::into_inner);

        if count != last {
            let sample = ConnectionSample::now(count);
            match time::timeout(self.persist_timeout, self.store.append_sample(&sample)).await {
                Ok(Ok(())) => debug!(count, "Connection sample persisted"),
                Ok(Err(e)) => warn!(error = %e, "Failed to append connection sample"),
                Err(_) => warn!("Timed out appending connection sample"),
            }
        }

        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = count;
    }
}
