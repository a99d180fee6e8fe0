//! CLI command definitions and dispatch.

pub mod migrate;
pub mod outcome;
pub mod queue;
pub mod run;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use seatwarden_core::config::AppConfig;
use seatwarden_core::error::AppError;
use seatwarden_database::{DatabasePool, PgReservationStore};
use seatwarden_portal::PortalBooker;
use seatwarden_worker::ReservationBatch;

use crate::output::OutputFormat;

/// SeatWarden: scheduled seat reservations for stored accounts
#[derive(Debug, Parser)]
#[command(name = "seatwarden", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Configuration overlay name, loaded from config/{env}.toml
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one reservation batch now
    Run,
    /// List active requests in processing order
    Queue,
    /// Show the stored outcome of a person
    Outcome(outcome::OutcomeArgs),
    /// Apply pending database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config, &self.env)?;

        match &self.command {
            Commands::Run => run::execute(&config, self.format).await,
            Commands::Queue => queue::execute(&config, self.format).await,
            Commands::Outcome(args) => outcome::execute(args, &config, self.format).await,
            Commands::Migrate => migrate::execute(&config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

/// Helper: connect the database and wrap it in a store
pub async fn create_store(config: &AppConfig) -> Result<Arc<PgReservationStore>, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(Arc::new(PgReservationStore::new(pool.into_pool())))
}

/// Helper: build a reservation batch against the real portal
pub async fn create_batch(config: &AppConfig) -> Result<ReservationBatch, AppError> {
    let store = create_store(config).await?;
    let booker = PortalBooker::new(Arc::new(config.portal.clone()));
    Ok(ReservationBatch::new(store, Arc::new(booker)))
}
