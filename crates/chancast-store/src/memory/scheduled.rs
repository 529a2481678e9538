//! In-memory versioned pending scheduled-message store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use chancast_core::result::AppResult;
use chancast_core::traits::storage::ScheduledStore;
use chancast_core::types::message::ChannelMessage;
use chancast_core::types::scheduled::PendingScheduled;

/// In-memory pending set with a compare-and-swap version guard.
#[derive(Debug, Default)]
pub struct MemoryScheduledStore {
    inner: Mutex<PendingScheduled>,
}

impl MemoryScheduledStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pending set, bypassing the version guard (test setup).
    pub async fn seed(&self, messages: Vec<ChannelMessage>) {
        let mut inner = self.inner.lock().await;
        inner.messages = messages;
        inner.version += 1;
    }
}

#[async_trait]
impl ScheduledStore for MemoryScheduledStore {
    async fn load_pending(&self) -> AppResult<PendingScheduled> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save_pending(
        &self,
        messages: Vec<ChannelMessage>,
        expected_version: u64,
    ) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        if inner.version != expected_version {
            return Ok(false);
        }
        inner.messages = messages;
        inner.version += 1;
        Ok(true)
    }
}
