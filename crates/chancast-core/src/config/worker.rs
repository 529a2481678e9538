//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration for the promotion and statistics jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron schedule for the scheduled-message promotion job.
    #[serde(default = "default_promotion_schedule")]
    pub promotion_schedule: String,
    /// Cron schedule for the connection-statistics logger job.
    #[serde(default = "default_statistics_schedule")]
    pub statistics_schedule: String,
    /// Timeout in seconds for each persistence call made by a job.
    #[serde(default = "default_persist_timeout")]
    pub persist_timeout_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            promotion_schedule: default_promotion_schedule(),
            statistics_schedule: default_statistics_schedule(),
            persist_timeout_seconds: default_persist_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_promotion_schedule() -> String {
    "0 * * * * *".to_string()
}

fn default_statistics_schedule() -> String {
    "0 */5 * * * *".to_string()
}

fn default_persist_timeout() -> u64 {
    5
}
