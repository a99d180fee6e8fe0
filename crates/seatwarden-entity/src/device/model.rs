//! Seat directory entry.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use seatwarden_core::types::DeviceId;

/// Maps the human-readable seat name to the identifier the portal expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Device {
    /// Portal-internal device identifier.
    pub dev_id: DeviceId,
    /// Seat name as printed in the reading room (e.g. `"3F-A012"`).
    pub dev_name: String,
    /// Free-form location label.
    pub location: Option<String>,
}
