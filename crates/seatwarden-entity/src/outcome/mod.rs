//! Reservation attempt outcomes and their stored form.

pub mod model;
pub mod reasons;

pub use model::{
    BookedSeat, NO_CANDIDATES_REASON, NO_FAILURE_SENTINEL, NO_RESULT_SENTINEL, OutcomeRecord,
    ReservationOutcome,
};
pub use reasons::FailureReasons;
