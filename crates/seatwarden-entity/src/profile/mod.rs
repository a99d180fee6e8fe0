//! Portal user profile entities.

pub mod model;

pub use model::{ProfileError, REQUIRED_PROFILE_FIELDS, UserProfile};
