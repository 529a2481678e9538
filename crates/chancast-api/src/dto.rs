//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chancast_core::types::message::ChannelMessage;
use chancast_core::types::stats::{ConnectionSample, PeakRecord};
use chancast_realtime::metrics::FanoutSnapshot;

/// Body of `POST /api/admin/new`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageRequest {
    /// Content type label.
    #[serde(rename = "type", default = "default_message_type")]
    pub message_type: String,
    /// Publication time; a future timestamp schedules the message.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Message body.
    pub text: String,
    /// Optional attached file id.
    #[serde(default)]
    pub file: Option<String>,
    /// Whether this message is an advertisement.
    #[serde(default)]
    pub is_ads: bool,
}

fn default_message_type() -> String {
    "text".to_string()
}

/// Body of `POST /api/reactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    /// The message whose reactions changed.
    pub message_id: i64,
}

/// Body of `POST /api/admin/scheduled` — wholesale replacement of the
/// pending set, guarded by the version the caller loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplacePendingRequest {
    /// The new pending set.
    pub messages: Vec<ChannelMessage>,
    /// Version of the set the caller loaded.
    pub version: u64,
}

/// Generic success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the operation succeeded.
    pub success: bool,
}

impl StatusResponse {
    /// A successful response.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body of `GET /api/admin/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Current live listener count.
    pub connected_listeners: u64,
    /// All-time peak record.
    pub peak: PeakRecord,
    /// Recent connection samples, oldest first.
    pub samples: Vec<ConnectionSample>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Current live listener count.
    pub connections: u64,
    /// Fan-out counters.
    pub fanout: FanoutSnapshot,
}
