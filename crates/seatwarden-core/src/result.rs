//! Convenience result type alias for SeatWarden.

use crate::error::AppError;

/// A specialized `Result` type for SeatWarden operations.
pub type AppResult<T> = Result<T, AppError>;
