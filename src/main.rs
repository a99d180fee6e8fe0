//! SeatWarden daemon.
//!
//! Loads configuration, connects the database and fires the reservation
//! batch on its cron schedule until Ctrl+C or SIGTERM.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use seatwarden_core::config::AppConfig;
use seatwarden_core::error::AppError;
use seatwarden_database::migration::run_migrations;
use seatwarden_database::{DatabasePool, PgReservationStore};
use seatwarden_portal::PortalBooker;
use seatwarden_worker::{CronScheduler, ReservationBatch};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("SEATWARDEN_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("SEATWARDEN_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main daemon run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SeatWarden v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    // ── Step 2: Reservation batch ────────────────────────────────
    let store = Arc::new(PgReservationStore::new(db.pool().clone()));
    let booker = Arc::new(PortalBooker::new(Arc::new(config.portal.clone())));
    let batch = Arc::new(ReservationBatch::new(store, booker));

    // ── Step 3: Cron trigger ─────────────────────────────────────
    let scheduler = if config.scheduler.enabled {
        let scheduler = CronScheduler::new(Arc::clone(&batch), config.scheduler.clone()).await?;
        scheduler.register().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::warn!("Scheduler disabled; waiting for shutdown only");
        None
    };

    // ── Step 4: Wait for shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received");

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("SeatWarden shut down gracefully");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
