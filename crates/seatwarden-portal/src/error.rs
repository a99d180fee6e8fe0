//! Portal failure taxonomy.

use std::fmt;

use thiserror::Error;

use seatwarden_core::error::{AppError, ErrorKind};

/// A failed call against the upstream portal.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The request never produced a response.
    #[error("{step} request failed: {source}")]
    Transport {
        /// Protocol step that was being performed.
        step: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The portal answered with a non-200 status.
    #[error("{step} returned status {status}")]
    Status {
        /// Protocol step that was being performed.
        step: &'static str,
        /// HTTP status code.
        status: u16,
    },
    /// The response did not have the expected shape.
    #[error("protocol violation: {0}")]
    Protocol(String),
    /// The portal understood the call and refused it.
    #[error("rejected by portal: {0}")]
    Rejected(String),
    /// Local encryption of a credential failed.
    #[error("credential encryption failed: {0}")]
    Crypto(String),
    /// A configured URL could not be parsed.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parser message.
        reason: String,
    },
}

impl PortalError {
    /// Wrap a transport error for the given step.
    pub fn transport(step: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { step, source }
    }

    /// Build a protocol violation.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}

/// The two login tiers of the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeTier {
    /// Gateway tunnel login.
    Gateway,
    /// Application login.
    Application,
}

impl fmt::Display for HandshakeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gateway => write!(f, "gateway"),
            Self::Application => write!(f, "application"),
        }
    }
}

/// A handshake that stopped in one of its tiers.
#[derive(Debug, Error)]
#[error("{tier} login failed: {source}")]
pub struct HandshakeError {
    /// Tier the handshake failed in.
    pub tier: HandshakeTier,
    /// What went wrong.
    #[source]
    pub source: PortalError,
}

impl HandshakeError {
    /// Attribute a portal error to a tier.
    pub fn new(tier: HandshakeTier, source: PortalError) -> Self {
        Self { tier, source }
    }
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        let kind = match &err {
            PortalError::Transport { .. } | PortalError::Status { .. } | PortalError::Rejected(_) => {
                ErrorKind::ExternalService
            }
            PortalError::Protocol(_) => ErrorKind::Serialization,
            PortalError::Crypto(_) => ErrorKind::Internal,
            PortalError::InvalidUrl { .. } => ErrorKind::Configuration,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

impl From<HandshakeError> for AppError {
    fn from(err: HandshakeError) -> Self {
        AppError::with_source(ErrorKind::Authentication, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_step() {
        let err = PortalError::Status {
            step: "public key",
            status: 502,
        };
        assert_eq!(err.to_string(), "public key returned status 502");
    }

    #[test]
    fn test_handshake_error_maps_to_authentication() {
        let err = HandshakeError::new(
            HandshakeTier::Application,
            PortalError::Rejected("wrong password".to_string()),
        );
        let app: AppError = err.into();

        assert_eq!(app.kind, ErrorKind::Authentication);
        assert_eq!(
            app.message,
            "application login failed: rejected by portal: wrong password"
        );
    }

    #[test]
    fn test_protocol_error_maps_to_serialization() {
        let app: AppError = PortalError::protocol("missing nonceStr").into();
        assert_eq!(app.kind, ErrorKind::Serialization);
    }
}
