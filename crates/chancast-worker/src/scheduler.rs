//! Cron scheduler for the periodic background jobs.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use chancast_core::config::worker::WorkerConfig;
use chancast_core::error::AppError;

use crate::jobs::promotion::ScheduledPromoter;
use crate::jobs::stats_logger::StatsLogger;

/// Cron-based scheduler driving the promotion and statistics jobs.
pub struct WorkerScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Scheduled-message promotion job.
    promoter: Arc<ScheduledPromoter>,
    /// Connection-statistics logger job.
    stats_logger: Arc<StatsLogger>,
    /// Worker configuration.
    config: WorkerConfig,
}

impl std::fmt::Debug for WorkerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerScheduler").finish()
    }
}

impl WorkerScheduler {
    /// Create a new worker scheduler.
    pub async fn new(
        config: WorkerConfig,
        promoter: Arc<ScheduledPromoter>,
        stats_logger: Arc<StatsLogger>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            promoter,
            stats_logger,
            config,
        })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_promotion().await?;
        self.register_statistics_logger().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Worker scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Worker scheduler shut down");
        Ok(())
    }

    /// Scheduled-message promotion — every minute by default.
    async fn register_promotion(&self) -> Result<(), AppError> {
        let promoter = Arc::clone(&self.promoter);
        let job = CronJob::new_async(self.config.promotion_schedule.as_str(), move |_uuid, _lock| {
            let promoter = Arc::clone(&promoter);
            Box::pin(async move {
                promoter.run_tick().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create promotion schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add promotion schedule: {e}")))?;

        tracing::info!(
            schedule = %self.config.promotion_schedule,
            "Registered: scheduled-message promotion"
        );
        Ok(())
    }

    /// Connection-statistics logger — every 5 minutes by default.
    async fn register_statistics_logger(&self) -> Result<(), AppError> {
        let stats_logger = Arc::clone(&self.stats_logger);
        let job = CronJob::new_async(
            self.config.statistics_schedule.as_str(),
            move |_uuid, _lock| {
                let stats_logger = Arc::clone(&stats_logger);
                Box::pin(async move {
                    stats_logger.run_once().await;
                })
            },
        )
        .map_err(|e| AppError::internal(format!("Failed to create statistics schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add statistics schedule: {e}")))?;

        tracing::info!(
            schedule = %self.config.statistics_schedule,
            "Registered: connection-statistics logger"
        );
        Ok(())
    }
}
