//! Pending scheduled-message set.

use serde::{Deserialize, Serialize};

use super::message::ChannelMessage;

/// The persisted set of not-yet-due scheduled messages.
///
/// The set is saved wholesale; `version` increments on every successful save
/// and guards replacement saves against clobbering a concurrent update
/// (compare-and-swap, see `ScheduledStore::save_pending`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingScheduled {
    /// Messages awaiting promotion, ordered by insertion.
    pub messages: Vec<ChannelMessage>,
    /// Version of the persisted set, for compare-and-swap saves.
    pub version: u64,
}
