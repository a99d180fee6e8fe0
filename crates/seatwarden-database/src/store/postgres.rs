//! PostgreSQL-backed reservation store.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use seatwarden_core::result::AppResult;
use seatwarden_core::types::{DeviceId, PersonId};
use seatwarden_entity::outcome::OutcomeRecord;
use seatwarden_entity::profile::UserProfile;
use seatwarden_entity::reservation::ReservationRecord;

use super::ReservationStore;
use crate::repositories::{
    DeviceRepository, OutcomeRepository, ReservationRepository, UserRepository,
};

/// Reservation store that delegates to the concrete repositories.
#[derive(Debug, Clone)]
pub struct PgReservationStore {
    reservations: ReservationRepository,
    devices: DeviceRepository,
    users: UserRepository,
    outcomes: OutcomeRepository,
}

impl PgReservationStore {
    /// Build a store over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            reservations: ReservationRepository::new(pool.clone()),
            devices: DeviceRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            outcomes: OutcomeRepository::new(pool),
        }
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn list_active_requests(&self) -> AppResult<Vec<ReservationRecord>> {
        self.reservations.find_active().await
    }

    async fn resolve_device_id(&self, dev_name: &str) -> AppResult<Option<DeviceId>> {
        self.devices.find_id_by_name(dev_name).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let inserted = self.users.insert_if_absent(profile).await?;
        if inserted {
            tracing::info!(pid = %profile.pid, "Stored new user profile");
        }
        Ok(())
    }

    async fn upsert_outcome(
        &self,
        pid: &PersonId,
        result_info: &str,
        written_at: NaiveDateTime,
    ) -> AppResult<()> {
        self.outcomes.upsert(pid, result_info, written_at).await
    }

    async fn fetch_outcome(&self, pid: &PersonId) -> AppResult<Option<OutcomeRecord>> {
        self.outcomes.find_by_pid(pid).await
    }
}
