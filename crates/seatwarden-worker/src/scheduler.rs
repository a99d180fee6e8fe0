//! Cron trigger for the reservation batch.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use seatwarden_core::config::SchedulerConfig;
use seatwarden_core::error::AppError;

use crate::batch::{BatchSummary, ReservationBatch};

/// Cron-based scheduler that fires the reservation batch.
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// The batch fired on every tick
    batch: Arc<ReservationBatch>,
    /// Held while a batch runs
    running: Arc<Mutex<()>>,
    /// Trigger settings
    config: SchedulerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("cron", &self.config.cron)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(batch: Arc<ReservationBatch>, config: SchedulerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            batch,
            running: Arc::new(Mutex::new(())),
            config,
        })
    }

    /// Register the reservation batch on the configured schedule (local time)
    pub async fn register(&self) -> Result<(), AppError> {
        let batch = Arc::clone(&self.batch);
        let running = Arc::clone(&self.running);

        let job = CronJob::new_async_tz(self.config.cron.as_str(), chrono::Local, move |_uuid, _lock| {
            let batch = Arc::clone(&batch);
            let running = Arc::clone(&running);
            Box::pin(async move {
                tracing::debug!("Cron fired reservation batch");
                run_exclusive(&batch, &running).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid reservation schedule '{}': {e}",
                self.config.cron
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add reservation schedule: {e}")))?;

        tracing::info!(cron = %self.config.cron, "Registered: reservation_batch");
        Ok(())
    }

    /// Start the scheduler, running one batch first if configured to
    pub async fn start(&self) -> Result<(), AppError> {
        if self.config.run_on_startup {
            self.trigger().await;
        }

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Run a batch now unless one is already running
    pub async fn trigger(&self) -> Option<BatchSummary> {
        run_exclusive(&self.batch, &self.running).await
    }

    /// Shutdown the scheduler; a batch in progress is not interrupted
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        let _finished = self.running.lock().await;
        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

/// Run the batch unless a previous firing still holds the lock.
async fn run_exclusive(batch: &ReservationBatch, running: &Mutex<()>) -> Option<BatchSummary> {
    let Ok(_guard) = running.try_lock() else {
        tracing::warn!("Previous reservation batch still running, firing skipped");
        return None;
    };

    match batch.run().await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::error!(error = %e, "Reservation batch could not start");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use seatwarden_core::types::DeviceId;
    use seatwarden_database::MemoryReservationStore;
    use seatwarden_entity::reservation::{Credentials, ReservationRecord, ResolvedWindow};
    use seatwarden_portal::{BookingReport, HandshakeError, HandshakeTier, PortalError, SeatBooker};
    use sqlx::types::Json;

    #[derive(Debug)]
    struct RefusingBooker;

    #[async_trait]
    impl SeatBooker for RefusingBooker {
        async fn book(
            &self,
            _credentials: &Credentials,
            _candidates: &[DeviceId],
            _window: &ResolvedWindow,
        ) -> Result<BookingReport, HandshakeError> {
            Err(HandshakeError::new(
                HandshakeTier::Gateway,
                PortalError::Rejected("closed".to_string()),
            ))
        }
    }

    async fn batch() -> Arc<ReservationBatch> {
        let store = MemoryReservationStore::new();
        store
            .put_request(ReservationRecord {
                pid: "a".into(),
                logon_name: "a".to_string(),
                password: "pw".to_string(),
                seat_list: Json(vec![]),
                begin_time: "10:30".to_string(),
                end_time: "22:00".to_string(),
                priority: 1,
                is_reserved: true,
            })
            .await;
        Arc::new(ReservationBatch::new(Arc::new(store), Arc::new(RefusingBooker)))
    }

    #[tokio::test]
    async fn test_firing_is_skipped_while_a_batch_runs() {
        let batch = batch().await;
        let running = Mutex::new(());

        let _held = running.lock().await;
        assert!(run_exclusive(&batch, &running).await.is_none());
    }

    #[tokio::test]
    async fn test_trigger_runs_when_idle() {
        let scheduler = CronScheduler::new(batch().await, SchedulerConfig::default())
            .await
            .unwrap();

        let summary = scheduler.trigger().await.expect("summary");
        assert_eq!(summary.visited, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.recorded, 0);
    }

    #[tokio::test]
    async fn test_invalid_cron_is_a_configuration_error() {
        let config = SchedulerConfig {
            cron: "not a schedule".to_string(),
            ..SchedulerConfig::default()
        };
        let scheduler = CronScheduler::new(batch().await, config).await.unwrap();

        let err = scheduler.register().await.unwrap_err();
        assert_eq!(err.kind, seatwarden_core::error::ErrorKind::Configuration);
    }
}
