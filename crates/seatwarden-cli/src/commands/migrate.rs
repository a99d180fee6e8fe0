//! Database migration command.

use seatwarden_core::config::AppConfig;
use seatwarden_core::error::AppError;
use seatwarden_database::DatabasePool;
use seatwarden_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;

    println!("Running database migrations...");
    run_migrations(pool.pool()).await?;
    pool.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
