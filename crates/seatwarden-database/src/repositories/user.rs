//! User profile repository implementation.

use sqlx::PgPool;

use seatwarden_core::error::{AppError, ErrorKind};
use seatwarden_core::result::AppResult;
use seatwarden_entity::profile::UserProfile;

/// Repository for profiles returned by the portal.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a profile unless one already exists for the person.
    ///
    /// The bearer token is session state and is not persisted.
    pub async fn insert_if_absent(&self, profile: &UserProfile) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO user_info \
             (pid, uuid, acc_no, logon_name, true_name, class_name, sex, dept_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (pid) DO NOTHING",
        )
        .bind(&profile.pid)
        .bind(&profile.uuid)
        .bind(&profile.acc_no)
        .bind(&profile.logon_name)
        .bind(&profile.true_name)
        .bind(&profile.class_name)
        .bind(&profile.sex)
        .bind(&profile.dept_name)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store profile", e))?;

        Ok(result.rows_affected() > 0)
    }
}
