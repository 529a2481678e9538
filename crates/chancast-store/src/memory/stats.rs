//! In-memory statistics store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use chancast_core::result::AppResult;
use chancast_core::traits::storage::StatsStore;
use chancast_core::types::stats::{ConnectionSample, PeakRecord};

/// In-memory peak record and append-only sample series.
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    peak: Mutex<Option<PeakRecord>>,
    samples: Mutex<Vec<ConnectionSample>>,
}

impl MemoryStatsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of persisted samples.
    pub async fn sample_count(&self) -> usize {
        self.samples.lock().await.len()
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    async fn load_peak(&self) -> AppResult<Option<PeakRecord>> {
        Ok(*self.peak.lock().await)
    }

    async fn save_peak(&self, peak: &PeakRecord) -> AppResult<()> {
        *self.peak.lock().await = Some(*peak);
        Ok(())
    }

    async fn append_sample(&self, sample: &ConnectionSample) -> AppResult<()> {
        self.samples.lock().await.push(*sample);
        Ok(())
    }

    async fn recent_samples(&self, limit: usize) -> AppResult<Vec<ConnectionSample>> {
        let samples = self.samples.lock().await;
        let start = samples.len().saturating_sub(limit);
        Ok(samples[start..].to_vec())
    }
}
