//! Catalog engine errors
//!
//! `CatalogError` is what every service returns. It bridges repository
//! errors and the API-layer [`AppError`], so handlers can use `?` directly.

use shared::error::{AppError, ErrorCode};
use shared::models::{CombinationError, Facet};
use std::fmt;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Kind of entity named in a not-found error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Attribute,
    AttributeValue,
    Binding,
    Variant,
    Group(Facet),
    Media,
    Stock,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Product => f.write_str("Product"),
            EntityKind::Attribute => f.write_str("Attribute"),
            EntityKind::AttributeValue => f.write_str("Attribute value"),
            EntityKind::Binding => f.write_str("Attribute binding"),
            EntityKind::Variant => f.write_str("Variant"),
            EntityKind::Group(facet) => write!(f, "{} group", facet.name()),
            EntityKind::Media => f.write_str("Media"),
            EntityKind::Stock => f.write_str("Stock"),
        }
    }
}

impl EntityKind {
    fn error_code(&self) -> ErrorCode {
        match self {
            EntityKind::Product => ErrorCode::ProductNotFound,
            EntityKind::Attribute => ErrorCode::AttributeNotFound,
            EntityKind::AttributeValue => ErrorCode::AttributeValueNotFound,
            EntityKind::Binding => ErrorCode::AttributeNotBound,
            EntityKind::Variant => ErrorCode::VariantNotFound,
            EntityKind::Group(_) => ErrorCode::GroupNotFound,
            EntityKind::Media => ErrorCode::MediaNotFound,
            EntityKind::Stock => ErrorCode::StockNotFound,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// Unbound/foreign attribute, value of another attribute, repeated key
    #[error("Invalid combination: {0}")]
    InvalidCombination(String),

    #[error("Conflicting state: {0}")]
    ConflictingState(String),

    /// More than one primary media in a single sync request
    #[error("Primary media conflict: {0}")]
    PrimaryConflict(String),

    /// A bulk request referenced an unknown id; nothing was written
    #[error("Bulk operation rejected: {0}")]
    PartialFailure(String),

    #[error("Pricing is not configured for variant {variant_id}")]
    PricingNotConfigured { variant_id: i64 },

    #[error("Weight is not configured for variant {variant_id}")]
    WeightNotConfigured { variant_id: i64 },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid stock quantity: {0}")]
    InvalidStock(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Repo(err.into())
    }
}

impl From<CombinationError> for CatalogError {
    fn from(err: CombinationError) -> Self {
        CatalogError::InvalidCombination(err.to_string())
    }
}

/// Result type for catalog services
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound { kind, id } => {
                AppError::with_message(kind.error_code(), message).with_detail("id", id)
            }
            CatalogError::InvalidCombination(_) => {
                AppError::with_message(ErrorCode::InvalidCombination, message)
            }
            CatalogError::ConflictingState(_) => {
                AppError::with_message(ErrorCode::ConflictingState, message)
            }
            CatalogError::PrimaryConflict(_) => {
                AppError::with_message(ErrorCode::MediaPrimaryConflict, message)
            }
            CatalogError::PartialFailure(_) => {
                AppError::with_message(ErrorCode::PartialFailure, message)
            }
            CatalogError::PricingNotConfigured { variant_id } => {
                AppError::with_message(ErrorCode::PricingNotConfigured, message)
                    .with_detail("variant_id", variant_id)
            }
            CatalogError::WeightNotConfigured { variant_id } => {
                AppError::with_message(ErrorCode::WeightNotConfigured, message)
                    .with_detail("variant_id", variant_id)
            }
            CatalogError::InvalidPrice(_) => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, message)
            }
            CatalogError::InvalidWeight(_) => {
                AppError::with_message(ErrorCode::ProductInvalidWeight, message)
            }
            CatalogError::InvalidStock(_) => {
                AppError::with_message(ErrorCode::StockInvalidQuantity, message)
            }
            CatalogError::InvalidPayload(_) => AppError::validation(message),
            CatalogError::Repo(repo) => repo.into(),
        }
    }
}

impl axum::response::IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        AppError::from(self).into_response()
    }
}
