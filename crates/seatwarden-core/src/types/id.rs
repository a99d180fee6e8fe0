//! Newtype wrappers around the string identifiers issued by the portal.
//!
//! Using distinct types prevents accidentally passing a `DeviceId` where a
//! `PersonId` is expected. When the `sqlx-support` feature is enabled,
//! each ID type is also transparent to `sqlx` as PostgreSQL `TEXT`.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        #[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx-support", sqlx(transparent))]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Person identifier of a portal account (student or staff number).
    ///
    /// Stored requests and recorded outcomes are both keyed by it.
    PersonId
);

define_id!(
    /// Internal identifier of a reservable device (a seat).
    DeviceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        let id = PersonId::new("2210104201");
        assert_eq!(id.to_string(), "2210104201");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = DeviceId::from("100455862");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"100455862\"");

        let parsed: DeviceId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut set = std::collections::HashSet::new();
        set.insert(PersonId::from("42"));
        assert!(set.contains("42"));
    }
}
