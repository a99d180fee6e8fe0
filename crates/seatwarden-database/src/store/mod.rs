//! The repository contract consumed by the reservation scheduler.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use seatwarden_core::result::AppResult;
use seatwarden_core::types::{DeviceId, PersonId};
use seatwarden_entity::outcome::OutcomeRecord;
use seatwarden_entity::profile::UserProfile;
use seatwarden_entity::reservation::ReservationRecord;

pub use memory::MemoryReservationStore;
pub use postgres::PgReservationStore;

/// Storage operations the scheduler and recorder depend on.
///
/// Implementations must give read-after-write consistency for an outcome
/// that was just upserted; nothing else is assumed about concurrency.
#[async_trait]
pub trait ReservationStore: Send + Sync + std::fmt::Debug {
    /// Every stored request with the active flag set, in no promised order.
    async fn list_active_requests(&self) -> AppResult<Vec<ReservationRecord>>;

    /// Resolve a seat name through the seat directory.
    async fn resolve_device_id(&self, dev_name: &str) -> AppResult<Option<DeviceId>>;

    /// Store a profile unless the person already has one.
    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()>;

    /// Insert or overwrite the outcome of a person.
    async fn upsert_outcome(
        &self,
        pid: &PersonId,
        result_info: &str,
        written_at: NaiveDateTime,
    ) -> AppResult<()>;

    /// Read back the latest outcome of a person.
    async fn fetch_outcome(&self, pid: &PersonId) -> AppResult<Option<OutcomeRecord>>;
}
