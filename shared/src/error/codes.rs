//! Unified error codes for the catalog workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (products, attributes, groups, variants, stock, media)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 60xx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product price is invalid
    ProductInvalidPrice = 6002,
    /// Product weight or dimensions are invalid
    ProductInvalidWeight = 6003,

    // ==================== 63xx: Attribute ====================
    /// Attribute not found
    AttributeNotFound = 6301,
    /// Attribute value not found
    AttributeValueNotFound = 6302,
    /// Attribute is not bound to the product
    AttributeNotBound = 6303,

    // ==================== 64xx: Grouping ====================
    /// Variant not found
    VariantNotFound = 6401,
    /// Facet group not found
    GroupNotFound = 6402,
    /// Combination references unknown/unbound attributes or is ambiguous
    InvalidCombination = 6403,
    /// No price group governs the variant
    PricingNotConfigured = 6404,
    /// No weight group governs the variant
    WeightNotConfigured = 6405,
    /// Request conflicts with the current stored state
    ConflictingState = 6406,
    /// A bulk operation referenced an unknown id
    PartialFailure = 6407,

    // ==================== 65xx: Media ====================
    /// Media not found
    MediaNotFound = 6501,
    /// More than one primary media in a single request
    MediaPrimaryConflict = 6502,

    // ==================== 66xx: Stock ====================
    /// Stock row not found
    StockNotFound = 6601,
    /// Stock quantities are invalid
    StockInvalidQuantity = 6602,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// System busy
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Invalid product price",
            ErrorCode::ProductInvalidWeight => "Invalid product weight or dimensions",

            // Attribute
            ErrorCode::AttributeNotFound => "Attribute not found",
            ErrorCode::AttributeValueNotFound => "Attribute value not found",
            ErrorCode::AttributeNotBound => "Attribute is not bound to the product",

            // Grouping
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::GroupNotFound => "Group not found",
            ErrorCode::InvalidCombination => "Invalid attribute combination",
            ErrorCode::PricingNotConfigured => "Pricing is not configured for this variant",
            ErrorCode::WeightNotConfigured => "Weight is not configured for this variant",
            ErrorCode::ConflictingState => "Request conflicts with current state",
            ErrorCode::PartialFailure => "Bulk operation referenced unknown items",

            // Media
            ErrorCode::MediaNotFound => "Media not found",
            ErrorCode::MediaPrimaryConflict => "Only one primary media is allowed per product",

            // Stock
            ErrorCode::StockNotFound => "Stock not found",
            ErrorCode::StockInvalidQuantity => "Invalid stock quantity",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductInvalidWeight),

            // Attribute
            6301 => Ok(ErrorCode::AttributeNotFound),
            6302 => Ok(ErrorCode::AttributeValueNotFound),
            6303 => Ok(ErrorCode::AttributeNotBound),

            // Grouping
            6401 => Ok(ErrorCode::VariantNotFound),
            6402 => Ok(ErrorCode::GroupNotFound),
            6403 => Ok(ErrorCode::InvalidCombination),
            6404 => Ok(ErrorCode::PricingNotConfigured),
            6405 => Ok(ErrorCode::WeightNotConfigured),
            6406 => Ok(ErrorCode::ConflictingState),
            6407 => Ok(ErrorCode::PartialFailure),

            // Media
            6501 => Ok(ErrorCode::MediaNotFound),
            6502 => Ok(ErrorCode::MediaPrimaryConflict),

            // Stock
            6601 => Ok(ErrorCode::StockNotFound),
            6602 => Ok(ErrorCode::StockInvalidQuantity),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::InvalidCombination.code(), 6403);
        assert_eq!(ErrorCode::MediaPrimaryConflict.code(), 6502);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(6404), Ok(ErrorCode::PricingNotConfigured));
        assert_eq!(ErrorCode::try_from(6601), Ok(ErrorCode::StockNotFound));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::InvalidCombination).unwrap();
        assert_eq!(json, "6403");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("6502").unwrap();
        assert_eq!(code, ErrorCode::MediaPrimaryConflict);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_all_codes() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::ProductInvalidPrice,
            ErrorCode::AttributeNotBound,
            ErrorCode::WeightNotConfigured,
            ErrorCode::PartialFailure,
            ErrorCode::StockInvalidQuantity,
            ErrorCode::SystemBusy,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
