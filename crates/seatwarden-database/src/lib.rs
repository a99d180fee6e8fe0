//! # seatwarden-database
//!
//! PostgreSQL connection management, concrete repositories, and the
//! [`ReservationStore`] contract the scheduler consumes. An in-memory store
//! implements the same contract for tests and dry runs.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{MemoryReservationStore, PgReservationStore, ReservationStore};
