//! Connection statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The highest observed concurrent-listener count and when it occurred.
///
/// `value` is monotonically non-decreasing across the process's and the
/// persisted record's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakRecord {
    /// Highest observed concurrent-listener count.
    pub value: u64,
    /// When the peak was observed.
    pub timestamp: DateTime<Utc>,
}

impl PeakRecord {
    /// A zero record, used before any listener has ever connected.
    pub fn zero() -> Self {
        Self {
            value: 0,
            timestamp: Utc::now(),
        }
    }
}

/// One point of the connection-count timeseries. Append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSample {
    /// Live listener count at sample time.
    pub count: u64,
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
}

impl ConnectionSample {
    /// Create a sample for the current instant.
    pub fn now(count: u64) -> Self {
        Self {
            count,
            timestamp: Utc::now(),
        }
    }
}
