//! Authenticated portal user profile.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use seatwarden_core::types::PersonId;

/// Fields the portal must return for a login to count as complete.
pub const REQUIRED_PROFILE_FIELDS: [&str; 9] = [
    "uuid",
    "accNo",
    "pid",
    "logonName",
    "trueName",
    "className",
    "sex",
    "deptName",
    "token",
];

/// Fields that must also carry a non-empty value.
const IDENTITY_FIELDS: [&str; 5] = ["uuid", "accNo", "pid", "logonName", "token"];

/// Reasons a login payload is not a usable profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The payload was not a JSON object.
    #[error("profile payload is not an object")]
    NotAnObject,
    /// One or more required fields were absent.
    #[error("profile is missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// A field was present but unusable.
    #[error("profile field '{field}' is invalid: {reason}")]
    InvalidField {
        /// Field name as sent by the portal.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// The account profile returned by a successful application login.
///
/// Construction goes through [`UserProfile::from_portal_json`], which checks
/// every required field by name.
#[derive(Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Portal-wide unique id.
    pub uuid: String,
    /// Account number used as the acting account in reservation calls.
    pub acc_no: String,
    /// Person id (student or staff number).
    pub pid: PersonId,
    /// Login name.
    pub logon_name: String,
    /// Display name.
    pub true_name: String,
    /// Class or group name.
    pub class_name: String,
    /// Sex code.
    pub sex: String,
    /// Department name.
    pub dept_name: String,
    /// Bearer token for application calls.
    pub token: String,
}

impl UserProfile {
    /// Validate and extract a profile from the login response `data` object.
    pub fn from_portal_json(data: &Value) -> Result<Self, ProfileError> {
        let object = data.as_object().ok_or(ProfileError::NotAnObject)?;

        let missing: Vec<&'static str> = REQUIRED_PROFILE_FIELDS
            .iter()
            .copied()
            .filter(|field| !object.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(ProfileError::MissingFields(missing));
        }

        Ok(Self {
            uuid: field_text(object, "uuid")?,
            acc_no: field_text(object, "accNo")?,
            pid: PersonId::new(field_text(object, "pid")?),
            logon_name: field_text(object, "logonName")?,
            true_name: field_text(object, "trueName")?,
            class_name: field_text(object, "className")?,
            sex: field_text(object, "sex")?,
            dept_name: field_text(object, "deptName")?,
            token: field_text(object, "token")?,
        })
    }
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("uuid", &self.uuid)
            .field("acc_no", &self.acc_no)
            .field("pid", &self.pid)
            .field("logon_name", &self.logon_name)
            .field("true_name", &self.true_name)
            .field("class_name", &self.class_name)
            .field("sex", &self.sex)
            .field("dept_name", &self.dept_name)
            .field("token", &"****")
            .finish()
    }
}

/// Read a field that the portal sends as either a string or a number.
pub fn field_text(object: &Map<String, Value>, field: &'static str) -> Result<String, ProfileError> {
    let text = match object.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            return Err(ProfileError::InvalidField {
                field,
                reason: format!("unexpected value {other}"),
            });
        }
    };

    if text.is_empty() && IDENTITY_FIELDS.contains(&field) {
        return Err(ProfileError::InvalidField {
            field,
            reason: "empty value".to_string(),
        });
    }

    Ok(text)
}
