//! # seatwarden-entity
//!
//! Domain entity models for SeatWarden. Structs that map to a database row
//! additionally derive `sqlx::FromRow`; the rest are value objects passed
//! between the portal client, the scheduler, and the store.

pub mod device;
pub mod outcome;
pub mod profile;
pub mod reservation;
