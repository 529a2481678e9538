//! Real-time SSE engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (SSE) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound queue depth per listener.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Heartbeat interval in seconds.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_seconds: u64,
    /// Timeout in seconds for statistics persistence calls.
    #[serde(default = "default_persist_timeout")]
    pub persist_timeout_seconds: u64,
    /// Maximum number of connection samples returned by the statistics endpoint.
    #[serde(default = "default_sample_limit")]
    pub statistics_sample_limit: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            heartbeat_interval_seconds: default_heartbeat_interval(),
            persist_timeout_seconds: default_persist_timeout(),
            statistics_sample_limit: default_sample_limit(),
        }
    }
}

fn default_queue_capacity() -> usize {
    10
}

fn default_heartbeat_interval() -> u64 {
    25
}

fn default_persist_timeout() -> u64 {
    5
}

fn default_sample_limit() -> usize {
    5000
}
