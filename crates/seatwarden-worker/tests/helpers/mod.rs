//! Shared fixtures: a scripted booker over the in-memory store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use sqlx::types::Json;

use seatwarden_core::types::{DeviceId, PersonId};
use seatwarden_database::MemoryReservationStore;
use seatwarden_entity::device::Device;
use seatwarden_entity::outcome::{
    BookedSeat, FailureReasons, NO_CANDIDATES_REASON, ReservationOutcome,
};
use seatwarden_entity::profile::UserProfile;
use seatwarden_entity::reservation::{Credentials, ReservationRecord, ResolvedWindow};
use seatwarden_portal::{
    BookingReport, HandshakeError, HandshakeTier, PortalError, SeatBooker,
};
use seatwarden_worker::ReservationBatch;

/// How the scripted booker answers for one account.
#[derive(Debug, Clone)]
pub enum Script {
    /// Book the first candidate.
    BookFirst,
    /// Reject every candidate with the given message.
    RejectAll(&'static str),
    /// Fail the handshake.
    LoginFails,
}

/// One call seen by the booker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCall {
    pub logon_name: String,
    pub candidates: Vec<DeviceId>,
}

/// Booker that follows a per-account script and logs every call.
#[derive(Debug, Default)]
pub struct ScriptedBooker {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<BookCall>>,
}

impl ScriptedBooker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, logon_name: &str, script: Script) -> Self {
        self.scripts.insert(logon_name.to_string(), script);
        self
    }

    pub fn calls(&self) -> Vec<BookCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn visit_order(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.logon_name).collect()
    }
}

#[async_trait]
impl SeatBooker for ScriptedBooker {
    async fn book(
        &self,
        credentials: &Credentials,
        candidates: &[DeviceId],
        _window: &ResolvedWindow,
    ) -> Result<BookingReport, HandshakeError> {
        self.calls.lock().expect("calls lock").push(BookCall {
            logon_name: credentials.logon_name.clone(),
            candidates: candidates.to_vec(),
        });

        let script = self
            .scripts
            .get(&credentials.logon_name)
            .cloned()
            .unwrap_or(Script::BookFirst);

        let outcome = match (script, candidates.first()) {
            (Script::LoginFails, _) => {
                return Err(HandshakeError::new(
                    HandshakeTier::Application,
                    PortalError::Rejected("wrong password".to_string()),
                ));
            }
            (_, None) => {
                let mut failures = FailureReasons::new();
                failures.push(NO_CANDIDATES_REASON);
                ReservationOutcome::failed(failures)
            }
            (Script::BookFirst, Some(device)) => ReservationOutcome::booked(
                BookedSeat {
                    message: "ok".to_string(),
                    booking_name: credentials.logon_name.clone(),
                    room_name: "Reading Room 3".to_string(),
                    device_name: device.to_string(),
                },
                FailureReasons::new(),
            ),
            (Script::RejectAll(message), Some(_)) => {
                ReservationOutcome::failed(candidates.iter().map(|_| message.to_string()).collect())
            }
        };

        Ok(BookingReport {
            profile: profile(&credentials.logon_name),
            outcome,
        })
    }
}

/// Profile whose person id equals the login name.
pub fn profile(logon_name: &str) -> UserProfile {
    UserProfile::from_portal_json(&json!({
        "uuid": format!("uuid-{logon_name}"),
        "accNo": format!("acc-{logon_name}"),
        "pid": logon_name,
        "logonName": logon_name,
        "trueName": "Test User",
        "className": "CS-22-1",
        "sex": "1",
        "deptName": "CS",
        "token": "tok"
    }))
    .expect("profile")
}

/// Stored request for `pid` with the given priority and seats.
pub fn request(pid: &str, priority: i32, seats: &[&str]) -> ReservationRecord {
    ReservationRecord {
        pid: PersonId::from(pid),
        logon_name: pid.to_string(),
        password: "pw".to_string(),
        seat_list: Json(seats.iter().map(|s| s.to_string()).collect()),
        begin_time: "10:30".to_string(),
        end_time: "22:00".to_string(),
        priority,
        is_reserved: true,
    }
}

/// A store whose directory knows seats `3F-A001` to `3F-A009`.
pub async fn store_with_seats() -> Arc<MemoryReservationStore> {
    let store = MemoryReservationStore::new();
    for n in 1..=9 {
        store
            .put_device(Device {
                dev_id: DeviceId::new(format!("10045580{n}")),
                dev_name: format!("3F-A00{n}"),
                location: Some("3F".to_string()),
            })
            .await;
    }
    Arc::new(store)
}

/// A batch over the store and booker.
pub fn batch(store: &Arc<MemoryReservationStore>, booker: &Arc<ScriptedBooker>) -> ReservationBatch {
    ReservationBatch::new(store.clone(), booker.clone())
}
