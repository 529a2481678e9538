//! Background tasks for ChannelCast.
//!
//! This crate provides:
//! - A cron scheduler that drives the periodic jobs
//! - The scheduled-message promotion job (default: every minute)
//! - The connection-statistics logger job (default: every 5 minutes)

pub mod jobs;
pub mod scheduler;

pub use jobs::promotion::ScheduledPromoter;
pub use jobs::stats_logger::StatsLogger;
pub use scheduler::WorkerScheduler;
