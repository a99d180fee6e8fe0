//! Seat directory repository implementation.

use sqlx::PgPool;

use seatwarden_core::error::{AppError, ErrorKind};
use seatwarden_core::result::AppResult;
use seatwarden_core::types::DeviceId;

/// Read-only access to the seat directory.
#[derive(Debug, Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    /// Create a new device repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up the device id for an exact seat name.
    pub async fn find_id_by_name(&self, dev_name: &str) -> AppResult<Option<DeviceId>> {
        sqlx::query_scalar::<_, DeviceId>(
            "SELECT dev_id FROM devices WHERE dev_name = $1 ORDER BY dev_id LIMIT 1",
        )
        .bind(dev_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up device", e))
    }
}
