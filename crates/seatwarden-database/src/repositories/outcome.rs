//! Reservation outcome repository implementation.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use seatwarden_core::error::{AppError, ErrorKind};
use seatwarden_core::result::AppResult;
use seatwarden_core::types::PersonId;
use seatwarden_entity::outcome::OutcomeRecord;

/// Repository for the latest outcome of each person.
#[derive(Debug, Clone)]
pub struct OutcomeRepository {
    pool: PgPool,
}

impl OutcomeRepository {
    /// Create a new outcome repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the outcome of a person.
    pub async fn upsert(
        &self,
        pid: &PersonId,
        result_info: &str,
        written_at: NaiveDateTime,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO reservation_result (pid, result_info, created_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (pid) DO UPDATE SET \
             result_info = EXCLUDED.result_info, created_at = EXCLUDED.created_at",
        )
        .bind(pid)
        .bind(result_info)
        .bind(written_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert outcome", e))?;
        Ok(())
    }

    /// Find the latest outcome of a person.
    pub async fn find_by_pid(&self, pid: &PersonId) -> AppResult<Option<OutcomeRecord>> {
        sqlx::query_as::<_, OutcomeRecord>(
            "SELECT pid, result_info, created_at FROM reservation_result WHERE pid = $1",
        )
        .bind(pid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find outcome", e))
    }
}
