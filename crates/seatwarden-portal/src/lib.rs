//! # seatwarden-portal
//!
//! Client for the upstream seat portal. A booking goes through two login
//! tiers (the gateway tunnel, then the application itself) over one cookie
//! session, and then tries candidate seats first-fit.

pub mod agent;
pub mod application;
pub mod context;
pub mod crypto;
pub mod error;
pub mod form;
pub mod gateway;
pub mod handshake;
pub mod reservation;
pub mod session;
pub mod wire;

pub use agent::{BookingReport, PortalBooker, SeatBooker};
pub use context::SessionContext;
pub use error::{HandshakeError, HandshakeTier, PortalError};
pub use handshake::{Handshake, HandshakeState};
pub use reservation::ReservationAttempt;
pub use session::{IdentityCookie, PortalSession};
