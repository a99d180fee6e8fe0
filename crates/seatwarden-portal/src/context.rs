//! Authenticated per-request session context.

use seatwarden_entity::profile::UserProfile;

use crate::session::PortalSession;

/// Everything a reservation attempt needs after a complete handshake.
///
/// Built once per request execution and never shared between requests.
#[derive(Debug)]
pub struct SessionContext {
    session: PortalSession,
    profile: UserProfile,
}

impl SessionContext {
    /// Pair an identity-carrying session with the profile it belongs to.
    pub fn new(session: PortalSession, profile: UserProfile) -> Self {
        Self { session, profile }
    }

    /// The underlying HTTP session.
    pub fn session(&self) -> &PortalSession {
        &self.session
    }

    /// The authenticated profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Bearer token for application calls.
    pub fn token(&self) -> &str {
        &self.profile.token
    }

    /// Give up the session and keep the profile.
    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}
