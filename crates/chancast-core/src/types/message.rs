//! Channel message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author name attributed to messages promoted by the scheduler.
pub const SCHEDULED_AUTHOR: &str = "Scheduled";

/// Author id attributed to messages promoted by the scheduler.
pub const SCHEDULED_AUTHOR_ID: &str = "0";

/// A single channel message.
///
/// Identity is assigned by the storage collaborator; the distribution core
/// only reads and copies messages. `views` is mutated by an external
/// view-tracking collaborator and carried through untouched here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessage {
    /// Monotonic message identity, assigned at persist/promotion time.
    pub id: i64,
    /// Content type label (e.g. `"text"`).
    #[serde(rename = "type")]
    pub message_type: String,
    /// Display name of the author.
    pub author: String,
    /// Stable author identity.
    pub author_id: String,
    /// Publication timestamp; a future timestamp marks a scheduled message.
    pub timestamp: DateTime<Utc>,
    /// Message body.
    pub text: String,
    /// Optional attached file id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// View counter, owned by the view-tracking collaborator.
    #[serde(default)]
    pub views: u64,
    /// Whether this message is an advertisement.
    #[serde(default)]
    pub is_ads: bool,
    /// Tombstone flag set on deletion.
    #[serde(default)]
    pub deleted: bool,
    /// Timestamp of the last edit, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edit: Option<DateTime<Utc>>,
}

impl ChannelMessage {
    /// Create a new text message with an unassigned identity.
    pub fn new(
        message_type: impl Into<String>,
        author: impl Into<String>,
        author_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            message_type: message_type.into(),
            author: author.into(),
            author_id: author_id.into(),
            timestamp,
            text: text.into(),
            file: None,
            views: 0,
            is_ads: false,
            deleted: false,
            last_edit: None,
        }
    }

    /// Create a deletion tombstone carrying only the identity.
    pub fn tombstone(id: i64) -> Self {
        Self {
            id,
            message_type: String::new(),
            author: String::new(),
            author_id: String::new(),
            timestamp: Utc::now(),
            text: String::new(),
            file: None,
            views: 0,
            is_ads: false,
            deleted: true,
            last_edit: None,
        }
    }

    /// Whether the message is due for promotion at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.timestamp <= now
    }
}
