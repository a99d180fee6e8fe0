//! Processing queue listing.

use serde::Serialize;
use tabled::Tabled;

use seatwarden_core::config::AppConfig;
use seatwarden_core::error::AppError;
use seatwarden_entity::reservation::ReservationRecord;

use crate::output::{self, OutputFormat};

/// Queue row; credentials are never shown.
#[derive(Debug, Serialize, Tabled)]
struct QueueRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Person")]
    pid: String,
    #[tabled(rename = "Priority")]
    priority: i32,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Seats")]
    seats: String,
}

impl QueueRow {
    fn new(position: usize, record: &ReservationRecord) -> Self {
        Self {
            position,
            pid: record.pid.to_string(),
            priority: record.priority,
            window: format!("{}-{}", record.begin_time, record.end_time),
            seats: record.seat_list.0.join(", "),
        }
    }
}

/// List active requests in the order the next batch will visit them
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let batch = super::create_batch(config).await?;

    let rows: Vec<QueueRow> = batch
        .queue()
        .await?
        .iter()
        .enumerate()
        .map(|(index, record)| QueueRow::new(index + 1, record))
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
