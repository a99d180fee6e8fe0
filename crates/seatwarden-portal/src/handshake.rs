//! Two-tier authentication handshake.

use std::fmt;

use seatwarden_core::config::PortalConfig;
use seatwarden_entity::reservation::Credentials;

use crate::application;
use crate::context::SessionContext;
use crate::error::{HandshakeError, HandshakeTier, PortalError};
use crate::gateway;
use crate::session::PortalSession;

/// Progress of a handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// No tier completed.
    Unauthenticated,
    /// The gateway tunnel accepted the shared credential.
    GatewayAuthenticated,
    /// The application issued a token and profile.
    ApplicationAuthenticated,
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::GatewayAuthenticated => write!(f, "gateway-authenticated"),
            Self::ApplicationAuthenticated => write!(f, "application-authenticated"),
        }
    }
}

/// Drives both login tiers over one fresh session.
///
/// There is no retry: a failure in either tier resets the state to
/// [`HandshakeState::Unauthenticated`] and is returned.
#[derive(Debug)]
pub struct Handshake<'a> {
    config: &'a PortalConfig,
    state: HandshakeState,
}

impl<'a> Handshake<'a> {
    /// Prepare a handshake against the configured portal.
    pub fn new(config: &'a PortalConfig) -> Self {
        Self {
            config,
            state: HandshakeState::Unauthenticated,
        }
    }

    /// Current state.
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Run both tiers for one account.
    pub async fn perform(
        &mut self,
        credentials: &Credentials,
    ) -> Result<SessionContext, HandshakeError> {
        self.state = HandshakeState::Unauthenticated;

        let session = PortalSession::new(&self.config.http)
            .map_err(|e| self.fail(HandshakeTier::Gateway, e))?;

        if let Err(e) = gateway::login(&session, &self.config.gateway).await {
            return Err(self.fail(HandshakeTier::Gateway, e));
        }
        self.state = HandshakeState::GatewayAuthenticated;

        let context = match application::login(session, &self.config.application, credentials).await
        {
            Ok(context) => context,
            Err(e) => return Err(self.fail(HandshakeTier::Application, e)),
        };
        self.state = HandshakeState::ApplicationAuthenticated;

        tracing::info!(pid = %context.profile().pid, state = %self.state, "Handshake complete");
        Ok(context)
    }

    fn fail(&mut self, tier: HandshakeTier, source: PortalError) -> HandshakeError {
        tracing::warn!(%tier, reached = %self.state, error = %source, "Handshake failed");
        self.state = HandshakeState::Unauthenticated;
        HandshakeError::new(tier, source)
    }
}
