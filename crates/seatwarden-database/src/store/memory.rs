//! In-memory reservation store for tests and dry runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use seatwarden_core::result::AppResult;
use seatwarden_core::types::{DeviceId, PersonId};
use seatwarden_entity::device::Device;
use seatwarden_entity::outcome::OutcomeRecord;
use seatwarden_entity::profile::UserProfile;
use seatwarden_entity::reservation::ReservationRecord;

use super::ReservationStore;

/// Internal state for the memory-based store.
#[derive(Debug, Default)]
struct InnerState {
    /// Stored requests in insertion order.
    requests: Vec<ReservationRecord>,
    /// Seat name to device id.
    devices: HashMap<String, DeviceId>,
    /// Profiles by person id.
    profiles: HashMap<PersonId, UserProfile>,
    /// Latest outcome by person id.
    outcomes: HashMap<PersonId, OutcomeRecord>,
}

/// Reservation store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryReservationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a stored request.
    pub async fn put_request(&self, record: ReservationRecord) {
        let mut state = self.state.write().await;
        state.requests.retain(|existing| existing.pid != record.pid);
        state.requests.push(record);
    }

    /// Add a seat directory entry.
    pub async fn put_device(&self, device: Device) {
        let mut state = self.state.write().await;
        state.devices.insert(device.dev_name, device.dev_id);
    }

    /// Profile stored for a person, if any.
    pub async fn profile(&self, pid: &PersonId) -> Option<UserProfile> {
        self.state.read().await.profiles.get(pid).cloned()
    }

    /// Number of stored outcomes.
    pub async fn outcome_count(&self) -> usize {
        self.state.read().await.outcomes.len()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn list_active_requests(&self) -> AppResult<Vec<ReservationRecord>> {
        let state = self.state.read().await;
        Ok(state
            .requests
            .iter()
            .filter(|record| record.is_reserved)
            .cloned()
            .collect())
    }

    async fn resolve_device_id(&self, dev_name: &str) -> AppResult<Option<DeviceId>> {
        Ok(self.state.read().await.devices.get(dev_name).cloned())
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let mut state = self.state.write().await;
        state
            .profiles
            .entry(profile.pid.clone())
            .or_insert_with(|| profile.clone());
        Ok(())
    }

    async fn upsert_outcome(
        &self,
        pid: &PersonId,
        result_info: &str,
        written_at: NaiveDateTime,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.outcomes.insert(
            pid.clone(),
            OutcomeRecord {
                pid: pid.clone(),
                result_info: result_info.to_string(),
                created_at: written_at,
            },
        );
        Ok(())
    }

    async fn fetch_outcome(&self, pid: &PersonId) -> AppResult<Option<OutcomeRecord>> {
        Ok(self.state.read().await.outcomes.get(pid).cloned())
    }
}
