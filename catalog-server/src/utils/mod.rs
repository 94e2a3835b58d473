//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] - re-exported from `shared::error`
//! - logging, money rounding and input validation helpers

pub mod logger;
pub mod money;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
