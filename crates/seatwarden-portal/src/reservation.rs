//! First-fit reservation over an ordered candidate list.

use seatwarden_core::config::ApplicationConfig;
use seatwarden_core::types::DeviceId;
use seatwarden_entity::outcome::{
    BookedSeat, FailureReasons, NO_CANDIDATES_REASON, ReservationOutcome,
};
use seatwarden_entity::reservation::ResolvedWindow;

use crate::context::SessionContext;
use crate::error::PortalError;
use crate::session::{expect_ok, read_json};
use crate::wire::{self, Envelope, ReserveBody, ReserveData};

const RESERVE_STEP: &str = "reserve";

/// Header carrying the bearer token on reservation calls.
const TOKEN_HEADER: &str = "token";

/// One reservation attempt for an authenticated account.
#[derive(Debug)]
pub struct ReservationAttempt<'a> {
    context: &'a SessionContext,
    config: &'a ApplicationConfig,
}

impl<'a> ReservationAttempt<'a> {
    /// Bind an attempt to a session context.
    pub fn new(context: &'a SessionContext, config: &'a ApplicationConfig) -> Self {
        Self { context, config }
    }

    /// Try each candidate in order and stop at the first booking.
    ///
    /// Every failed candidate contributes one reason, deduplicated by first
    /// occurrence. An empty list fails at once without touching the network.
    pub async fn run(&self, candidates: &[DeviceId], window: &ResolvedWindow) -> ReservationOutcome {
        let mut failures = FailureReasons::new();

        if candidates.is_empty() {
            failures.push(NO_CANDIDATES_REASON);
            return ReservationOutcome::failed(failures);
        }

        for device_id in candidates {
            match self.reserve(device_id, window).await {
                Ok(seat) => {
                    tracing::info!(%device_id, room = %seat.room_name, "Seat booked");
                    return ReservationOutcome::booked(seat, failures);
                }
                Err(e) => {
                    let reason = failure_reason(device_id, &e);
                    tracing::debug!(%device_id, %reason, "Candidate failed");
                    failures.push(reason);
                }
            }
        }

        ReservationOutcome::failed(failures)
    }

    async fn reserve(
        &self,
        device_id: &DeviceId,
        window: &ResolvedWindow,
    ) -> Result<BookedSeat, PortalError> {
        let session = self.context.session();
        let profile = self.context.profile();

        let body = ReserveBody {
            test_name: "",
            app_acc_no: &profile.acc_no,
            member_kind: 1,
            resv_dev: [device_id],
            resv_member: [&profile.acc_no],
            resv_property: 0,
            sys_kind: 8,
            resv_begin_time: window.begin_text(),
            resv_end_time: window.end_text(),
        };

        let request = session
            .post(&wire::endpoint(self.config, wire::RESERVE_PATH))?
            .header(TOKEN_HEADER, self.context.token())
            .json(&body);
        let response = session.send(RESERVE_STEP, request).await?;
        expect_ok(RESERVE_STEP, &response)?;

        let envelope: Envelope<ReserveData> = read_json(RESERVE_STEP, response).await?;
        if !envelope.is_success() {
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("seat {device_id} refused with code {}", envelope.code));
            return Err(PortalError::Rejected(message));
        }

        // A success code ends the attempt even when seat details are missing.
        let data = envelope.data.unwrap_or_default();
        let device = data.resv_dev_info_list.into_iter().next().unwrap_or_default();
        let device_name = if device.dev_name.is_empty() {
            tracing::warn!(%device_id, "Booking accepted without seat details");
            device_id.to_string()
        } else {
            device.dev_name
        };

        Ok(BookedSeat {
            message: envelope.message.unwrap_or_default(),
            booking_name: data.resv_name,
            room_name: device.room_name,
            device_name,
        })
    }
}

/// Reason recorded for a failed candidate.
fn failure_reason(device_id: &DeviceId, error: &PortalError) -> String {
    match error {
        PortalError::Status { status, .. } => {
            format!("seat {device_id} request failed: status {status}")
        }
        PortalError::Rejected(message) => message.clone(),
        PortalError::Transport { source, .. } => {
            format!("seat {device_id} request failed: {source}")
        }
        other => format!("seat {device_id}: {other}"),
    }
}
