//! Persists the outcome of one reservation attempt.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use seatwarden_core::result::AppResult;
use seatwarden_database::ReservationStore;
use seatwarden_entity::outcome::ReservationOutcome;
use seatwarden_entity::profile::UserProfile;

/// Writes profiles and outcomes through the reservation store.
#[derive(Debug, Clone)]
pub struct OutcomeRecorder {
    store: Arc<dyn ReservationStore>,
}

impl OutcomeRecorder {
    /// Create a recorder over a store.
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Store the profile if new, then overwrite the person's outcome.
    ///
    /// Returns the local time stamped on the outcome.
    pub async fn record(
        &self,
        profile: &UserProfile,
        outcome: &ReservationOutcome,
    ) -> AppResult<NaiveDateTime> {
        self.store.save_profile(profile).await?;

        let text = outcome.result_text();
        let written_at = Local::now().naive_local();
        self.store
            .upsert_outcome(&profile.pid, &text, written_at)
            .await?;

        tracing::info!(
            pid = %profile.pid,
            success = outcome.is_success(),
            result = %text,
            "Outcome recorded"
        );
        Ok(written_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatwarden_database::MemoryReservationStore;
    use seatwarden_entity::outcome::{FailureReasons, NO_FAILURE_SENTINEL, NO_RESULT_SENTINEL};
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile::from_portal_json(&json!({
            "uuid": "u-1", "accNo": "100234", "pid": "2210104201",
            "logonName": "2210104201", "trueName": "Li Hua", "className": "CS-22-1",
            "sex": "1", "deptName": "CS", "token": "tok-abc"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_overwrites_previous_outcome() {
        let store = Arc::new(MemoryReservationStore::new());
        let recorder = OutcomeRecorder::new(store.clone());
        let profile = profile();

        let failures: FailureReasons = vec!["resource occupied".to_string()].into_iter().collect();
        recorder
            .record(&profile, &ReservationOutcome::failed(failures))
            .await
            .unwrap();
        let second = recorder
            .record(&profile, &ReservationOutcome::failed(FailureReasons::new()))
            .await
            .unwrap();

        let stored = store.fetch_outcome(&profile.pid).await.unwrap().unwrap();
        assert_eq!(
            stored.result_info,
            format!("{NO_RESULT_SENTINEL},{NO_FAILURE_SENTINEL}")
        );
        assert_eq!(stored.created_at, second);
        assert_eq!(store.outcome_count().await, 1);
        assert!(store.profile(&profile.pid).await.is_some());
    }
}
