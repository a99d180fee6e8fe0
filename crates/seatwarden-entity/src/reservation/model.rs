//! Stored reservation request model.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use seatwarden_core::error::AppError;
use seatwarden_core::types::PersonId;

use super::window::TimeWindow;

/// Application-tier login of a stored account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Portal login name.
    pub logon_name: String,
    /// Portal password in clear text.
    pub password: String,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(logon_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            logon_name: logon_name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("logon_name", &self.logon_name)
            .field("password", &"****")
            .finish()
    }
}

/// Row of the `reservation_info` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRecord {
    /// Person id of the account owner (primary key).
    pub pid: PersonId,
    /// Portal login name.
    pub logon_name: String,
    /// Portal password.
    pub password: String,
    /// Seat names in preference order.
    pub seat_list: Json<Vec<String>>,
    /// Window start, `HH:MM` or `HH:MM:SS`.
    pub begin_time: String,
    /// Window end, `HH:MM` or `HH:MM:SS`.
    pub end_time: String,
    /// Processing priority; larger runs first.
    pub priority: i32,
    /// Whether the request takes part in scheduled runs.
    pub is_reserved: bool,
}

/// A validated reservation request as consumed by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// Request identifier; one request per person.
    pub id: PersonId,
    /// Application-tier login.
    pub credentials: Credentials,
    /// Seat names in preference order, resolved to ids before each attempt.
    pub seat_names: Vec<String>,
    /// Desired daily window.
    pub window: TimeWindow,
    /// Processing priority; larger runs first.
    pub priority: i32,
    /// Whether the request takes part in scheduled runs.
    pub active: bool,
}

impl TryFrom<ReservationRecord> for ReservationRequest {
    type Error = AppError;

    fn try_from(record: ReservationRecord) -> Result<Self, Self::Error> {
        let window = TimeWindow::parse(&record.begin_time, &record.end_time).map_err(|e| {
            AppError::validation(format!("Request {}: {}", record.pid, e.message))
        })?;

        Ok(Self {
            id: record.pid,
            credentials: Credentials::new(record.logon_name, record.password),
            seat_names: record.seat_list.0,
            window,
            priority: record.priority,
            active: record.is_reserved,
        })
    }
}
