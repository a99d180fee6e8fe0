//! Reservation request repository implementation.

use sqlx::PgPool;

use seatwarden_core::error::{AppError, ErrorKind};
use seatwarden_core::result::AppResult;
use seatwarden_entity::reservation::ReservationRecord;

const RECORD_COLUMNS: &str =
    "pid, logon_name, password, seat_list, begin_time, end_time, priority, is_reserved";

/// Repository for stored reservation requests.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find every request that takes part in scheduled runs.
    pub async fn find_active(&self) -> AppResult<Vec<ReservationRecord>> {
        sqlx::query_as::<_, ReservationRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM reservation_info \
             WHERE is_reserved = TRUE ORDER BY priority DESC, pid ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active reservations", e)
        })
    }
}
