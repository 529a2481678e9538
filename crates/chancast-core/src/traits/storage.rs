//! Storage collaborator interfaces.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::message::ChannelMessage;
use crate::types::scheduled::PendingScheduled;
use crate::types::stats::{ConnectionSample, PeakRecord};

/// Durable message storage.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Allocate the next monotonic message identity.
    async fn next_message_id(&self) -> AppResult<i64>;

    /// Persist a message. `is_update` distinguishes edits from inserts.
    async fn persist_message(&self, message: &ChannelMessage, is_update: bool) -> AppResult<()>;

    /// Fetch a message by identity.
    async fn message_by_id(&self, id: i64) -> AppResult<Option<ChannelMessage>>;

    /// Tombstone-delete a message by identity.
    async fn delete_message(&self, id: i64) -> AppResult<()>;
}

/// Pending scheduled-message set storage.
///
/// The set is always replaced wholesale. Saves carry the version the caller
/// loaded; a save against a stale version returns `Ok(false)` and leaves the
/// stored set untouched, so concurrent mutations are never silently lost.
#[async_trait]
pub trait ScheduledStore: Send + Sync {
    /// Load the full pending set together with its current version.
    async fn load_pending(&self) -> AppResult<PendingScheduled>;

    /// Replace the pending set if `expected_version` still matches.
    ///
    /// Returns `Ok(true)` on success, `Ok(false)` on a version conflict.
    async fn save_pending(
        &self,
        messages: Vec<ChannelMessage>,
        expected_version: u64,
    ) -> AppResult<bool>;
}

/// Connection statistics persistence.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Load the persisted all-time peak, if any.
    async fn load_peak(&self) -> AppResult<Option<PeakRecord>>;

    /// Persist the all-time peak.
    async fn save_peak(&self, peak: &PeakRecord) -> AppResult<()>;

    /// Append one connection sample to the timeseries.
    async fn append_sample(&self, sample: &ConnectionSample) -> AppResult<()>;

    /// Return the most recent samples, oldest first, at most `limit`.
    async fn recent_samples(&self, limit: usize) -> AppResult<Vec<ConnectionSample>>;
}
