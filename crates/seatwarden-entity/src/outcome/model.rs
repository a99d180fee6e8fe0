//! Reservation outcome models.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use seatwarden_core::types::PersonId;

use super::reasons::FailureReasons;

/// Reason recorded when a request has no resolvable seat to try.
pub const NO_CANDIDATES_REASON: &str = "no candidate seats to reserve";

/// Stored in place of a success description when nothing was booked.
pub const NO_RESULT_SENTINEL: &str = "no reservation result";

/// Stored in place of the failure list when nothing failed.
pub const NO_FAILURE_SENTINEL: &str = "no failure information";

/// Booking details returned by the portal for the acquired seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSeat {
    /// Server confirmation message.
    pub message: String,
    /// Booking name assigned by the portal.
    pub booking_name: String,
    /// Reading room the seat belongs to.
    pub room_name: String,
    /// Seat name as known to the portal.
    pub device_name: String,
}

impl BookedSeat {
    /// Human-readable summary of the booking.
    pub fn description(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.message, self.booking_name, self.room_name, self.device_name
        )
    }
}

/// Result of one reservation attempt over a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationOutcome {
    /// The seat that was acquired, if any.
    pub booked: Option<BookedSeat>,
    /// Reasons collected from candidates that failed before the result.
    pub failures: FailureReasons,
    /// Local wall-clock time the outcome was captured.
    pub captured_at: NaiveDateTime,
}

impl ReservationOutcome {
    /// A successful outcome.
    pub fn booked(seat: BookedSeat, failures: FailureReasons) -> Self {
        Self {
            booked: Some(seat),
            failures,
            captured_at: Local::now().naive_local(),
        }
    }

    /// An outcome where every candidate failed.
    pub fn failed(failures: FailureReasons) -> Self {
        Self {
            booked: None,
            failures,
            captured_at: Local::now().naive_local(),
        }
    }

    /// Whether a seat was acquired.
    pub fn is_success(&self) -> bool {
        self.booked.is_some()
    }

    /// Combined text stored for the request.
    ///
    /// The success description (or [`NO_RESULT_SENTINEL`]) followed by the
    /// joined failure reasons (or [`NO_FAILURE_SENTINEL`]).
    pub fn result_text(&self) -> String {
        let success = self
            .booked
            .as_ref()
            .map(BookedSeat::description)
            .unwrap_or_else(|| NO_RESULT_SENTINEL.to_string());

        let failures = if self.failures.is_empty() {
            NO_FAILURE_SENTINEL.to_string()
        } else {
            self.failures.joined()
        };

        format!("{success},{failures}")
    }
}

/// Row of the `reservation_result` table: the latest outcome per person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OutcomeRecord {
    /// Person id the outcome belongs to.
    pub pid: PersonId,
    /// Combined result text.
    pub result_info: String,
    /// Local wall-clock time of the most recent write.
    pub created_at: NaiveDateTime,
}
