//! The booking seam between the scheduler and the portal.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use seatwarden_core::config::PortalConfig;
use seatwarden_core::types::DeviceId;
use seatwarden_entity::outcome::ReservationOutcome;
use seatwarden_entity::profile::UserProfile;
use seatwarden_entity::reservation::{Credentials, ResolvedWindow};

use crate::error::HandshakeError;
use crate::handshake::Handshake;
use crate::reservation::ReservationAttempt;

/// What one complete booking run produced.
#[derive(Debug, Clone)]
pub struct BookingReport {
    /// Profile returned by the application login.
    pub profile: UserProfile,
    /// Outcome of the reservation attempt.
    pub outcome: ReservationOutcome,
}

/// Authenticates an account and attempts its candidate seats.
#[async_trait]
pub trait SeatBooker: Send + Sync + fmt::Debug {
    /// Run the handshake then a first-fit attempt over `candidates`.
    ///
    /// A handshake failure yields no report at all.
    async fn book(
        &self,
        credentials: &Credentials,
        candidates: &[DeviceId],
        window: &ResolvedWindow,
    ) -> Result<BookingReport, HandshakeError>;
}

/// Booker that talks to the real portal, one fresh session per call.
#[derive(Debug, Clone)]
pub struct PortalBooker {
    config: Arc<PortalConfig>,
}

impl PortalBooker {
    /// Create a booker for the configured portal.
    pub fn new(config: Arc<PortalConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SeatBooker for PortalBooker {
    async fn book(
        &self,
        credentials: &Credentials,
        candidates: &[DeviceId],
        window: &ResolvedWindow,
    ) -> Result<BookingReport, HandshakeError> {
        let context = Handshake::new(&self.config).perform(credentials).await?;

        let outcome = ReservationAttempt::new(&context, &self.config.application)
            .run(candidates, window)
            .await;

        Ok(BookingReport {
            profile: context.into_profile(),
            outcome,
        })
    }
}
