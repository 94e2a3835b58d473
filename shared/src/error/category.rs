//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 60xx: Product errors
/// - 63xx: Attribute errors
/// - 64xx: Grouping errors (variants, facet groups, combinations)
/// - 65xx: Media errors
/// - 66xx: Stock errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Product errors (60xx-62xx)
    Product,
    /// Attribute errors (63xx)
    Attribute,
    /// Grouping errors (64xx)
    Grouping,
    /// Media errors (65xx)
    Media,
    /// Stock errors (66xx-69xx)
    Stock,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            6000..6300 => Self::Product,
            6300..6400 => Self::Attribute,
            6400..6500 => Self::Grouping,
            6500..6600 => Self::Media,
            6600..7000 => Self::Stock,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Product => "product",
            Self::Attribute => "attribute",
            Self::Grouping => "grouping",
            Self::Media => "media",
            Self::Stock => "stock",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
