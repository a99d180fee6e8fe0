//! Schema migrations embedded from `migrations/`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;

use seatwarden_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the reservation schema up to date.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.migrations.len();
    tracing::info!(known, "Applying reservation schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Reservation schema migration failed: {e}"),
            e,
        )
    })?;

    tracing::info!("Reservation schema is current");
    Ok(())
}
