//! Stored reservation request entities.

pub mod model;
pub mod window;

pub use model::{Credentials, ReservationRecord, ReservationRequest};
pub use window::{ResolvedWindow, TimeWindow};
