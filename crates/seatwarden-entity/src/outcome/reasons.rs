//! Ordered, de-duplicated failure reasons.

use serde::{Deserialize, Serialize};

/// Failure reasons in first-occurrence order, each stored once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureReasons(Vec<String>);

impl FailureReasons {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reason unless an identical one is already present.
    ///
    /// Returns `true` if the reason was new.
    pub fn push(&mut self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        if self.0.contains(&reason) {
            return false;
        }
        self.0.push(reason);
        true
    }

    /// Whether no reason was collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct reasons.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The reasons in first-occurrence order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Reasons joined with `", "`.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl FromIterator<String> for FailureReasons {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut reasons = Self::new();
        for reason in iter {
            reasons.push(reason);
        }
        reasons
    }
}
