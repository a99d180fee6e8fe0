//! Stored outcome lookup.

use clap::Args;

use seatwarden_core::config::AppConfig;
use seatwarden_core::error::AppError;
use seatwarden_core::types::PersonId;
use seatwarden_database::ReservationStore;

use crate::output::{self, OutputFormat};

/// Arguments for the outcome command
#[derive(Debug, Args)]
pub struct OutcomeArgs {
    /// Person id of the account
    pub pid: String,
}

/// Print the latest outcome of a person
pub async fn execute(
    args: &OutcomeArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::create_store(config).await?;
    let pid = PersonId::new(args.pid.clone());

    let outcome = store
        .fetch_outcome(&pid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No outcome recorded for {pid}")))?;

    output::print_record(
        &[
            ("Person", outcome.pid.to_string()),
            ("Result", outcome.result_info.clone()),
            ("Written at", outcome.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ],
        &outcome,
        format,
    );
    Ok(())
}
