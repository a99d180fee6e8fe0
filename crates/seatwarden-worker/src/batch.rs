//! Priority-ordered reservation batch.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::Instrument;

use seatwarden_core::error::ErrorKind;
use seatwarden_core::result::AppResult;
use seatwarden_core::types::DeviceId;
use seatwarden_database::ReservationStore;
use seatwarden_entity::outcome::ReservationOutcome;
use seatwarden_entity::reservation::{ReservationRecord, ReservationRequest};
use seatwarden_portal::SeatBooker;

use crate::recorder::OutcomeRecorder;

/// Counts gathered over one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Requests taken from the queue.
    pub visited: usize,
    /// Requests whose outcome was written.
    pub recorded: usize,
    /// Recorded outcomes that acquired a seat.
    pub booked: usize,
    /// Requests that stopped with an error and wrote nothing.
    pub failed: usize,
}

/// Runs every active request once, highest priority first.
///
/// Requests are processed strictly one after another, each with its own
/// session. An error in one request is logged and never stops the batch.
#[derive(Debug, Clone)]
pub struct ReservationBatch {
    store: Arc<dyn ReservationStore>,
    booker: Arc<dyn SeatBooker>,
    recorder: OutcomeRecorder,
}

impl ReservationBatch {
    /// Create a batch over a store and a booker.
    pub fn new(store: Arc<dyn ReservationStore>, booker: Arc<dyn SeatBooker>) -> Self {
        let recorder = OutcomeRecorder::new(Arc::clone(&store));
        Self {
            store,
            booker,
            recorder,
        }
    }

    /// Active requests in processing order.
    ///
    /// Equal priorities keep the order the store returned them in.
    pub async fn queue(&self) -> AppResult<Vec<ReservationRecord>> {
        let mut records: Vec<ReservationRecord> = self
            .store
            .list_active_requests()
            .await?
            .into_iter()
            .filter(|record| record.is_reserved)
            .collect();

        records.sort_by_key(|record| Reverse(record.priority));
        Ok(records)
    }

    /// Process the whole queue.
    ///
    /// Only a failure to load the queue is returned as an error.
    pub async fn run(&self) -> AppResult<BatchSummary> {
        let queue = self.queue().await?;
        tracing::info!(requests = queue.len(), "Reservation batch started");

        let mut summary = BatchSummary::default();
        for record in queue {
            summary.visited += 1;
            let span = tracing::info_span!(
                "reservation",
                pid = %record.pid,
                priority = record.priority
            );

            match self.process(record).instrument(span.clone()).await {
                Ok(outcome) => {
                    summary.recorded += 1;
                    if outcome.is_success() {
                        summary.booked += 1;
                    }
                }
                Err(e) if e.kind == ErrorKind::Authentication => {
                    summary.failed += 1;
                    span.in_scope(|| {
                        tracing::warn!(error = %e, "Login incomplete, outcome left unchanged")
                    });
                }
                Err(e) => {
                    summary.failed += 1;
                    span.in_scope(|| tracing::error!(error = %e, "Request failed"));
                }
            }
        }

        tracing::info!(
            visited = summary.visited,
            recorded = summary.recorded,
            booked = summary.booked,
            failed = summary.failed,
            "Reservation batch finished"
        );
        Ok(summary)
    }

    async fn process(&self, record: ReservationRecord) -> AppResult<ReservationOutcome> {
        let request = ReservationRequest::try_from(record)?;
        let candidates = self.resolve_candidates(&request.seat_names).await?;
        let window = request.window.resolve_tomorrow()?;

        tracing::debug!(
            candidates = candidates.len(),
            window = %request.window,
            "Attempting reservation"
        );

        let report = self
            .booker
            .book(&request.credentials, &candidates, &window)
            .await?;
        self.recorder.record(&report.profile, &report.outcome).await?;

        Ok(report.outcome)
    }

    /// Resolve seat names in order, skipping names the directory lacks.
    async fn resolve_candidates(&self, names: &[String]) -> AppResult<Vec<DeviceId>> {
        let mut candidates = Vec::with_capacity(names.len());
        for name in names {
            match self.store.resolve_device_id(name).await? {
                Some(id) => candidates.push(id),
                None => tracing::warn!(seat = %name, "Seat name not in directory, skipped"),
            }
        }
        Ok(candidates)
    }
}
