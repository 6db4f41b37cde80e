//! Convenience result type alias for CompanyHub.

use crate::error::AppError;

/// A specialized `Result` type for CompanyHub operations.
pub type AppResult<T> = Result<T, AppError>;
