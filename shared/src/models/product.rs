//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Parent of every binding, facet group, variant and stock row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
}
