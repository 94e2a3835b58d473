//! Attribute Model

use serde::{Deserialize, Serialize};

/// Attribute entity (e.g. Color, Size)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Attribute {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Attribute value (e.g. Red, XL)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_id: i64,
    pub label_en: String,
    pub label_ar: String,
    pub display_order: i32,
    /// Inactive values are excluded from the variant matrix
    pub is_active: bool,
}

/// Attribute with its ordered values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeFull {
    #[serde(flatten)]
    pub attribute: Attribute,
    pub values: Vec<AttributeValue>,
}

/// Create attribute payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeCreate {
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub values: Vec<AttributeValueCreate>,
}

/// Create attribute value payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValueCreate {
    pub label_en: String,
    #[serde(default)]
    pub label_ar: String,
    /// Defaults to the position in the create request
    pub display_order: Option<i32>,
}

/// Toggle payload for `PUT /api/attributes/values/{id}/active`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValueActive {
    pub is_active: bool,
}
