//! Shared types for the catalog workspace
//!
//! Domain models for the attribute-combination grouping engine, the unified
//! error system and small utilities used by the server and its clients.

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{CombinationError, CombinationKey, Facet};
