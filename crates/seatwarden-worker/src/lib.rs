//! Reservation processing for SeatWarden.
//!
//! This crate provides:
//! - The priority-ordered reservation batch with per-request failure isolation
//! - The outcome recorder that persists each attempt
//! - A cron scheduler that triggers the batch without overlapping runs

pub mod batch;
pub mod recorder;
pub mod scheduler;

pub use batch::{BatchSummary, ReservationBatch};
pub use recorder::OutcomeRecorder;
pub use scheduler::CronScheduler;
