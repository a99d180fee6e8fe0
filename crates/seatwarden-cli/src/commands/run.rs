//! One-off reservation batch.

use serde::Serialize;

use seatwarden_core::config::AppConfig;
use seatwarden_core::error::AppError;
use seatwarden_worker::BatchSummary;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct SummaryView {
    visited: usize,
    recorded: usize,
    booked: usize,
    failed: usize,
}

impl From<BatchSummary> for SummaryView {
    fn from(summary: BatchSummary) -> Self {
        Self {
            visited: summary.visited,
            recorded: summary.recorded,
            booked: summary.booked,
            failed: summary.failed,
        }
    }
}

/// Run every active request once and print the counts
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let batch = super::create_batch(config).await?;
    let view = SummaryView::from(batch.run().await?);

    output::print_record(
        &[
            ("Visited", view.visited.to_string()),
            ("Recorded", view.recorded.to_string()),
            ("Booked", view.booked.to_string()),
            ("Failed", view.failed.to_string()),
        ],
        &view,
        format,
    );

    if view.failed > 0 {
        output::print_warning(&format!(
            "{} request(s) failed without writing an outcome; see logs.",
            view.failed
        ));
    }
    Ok(())
}
