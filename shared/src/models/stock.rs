//! Stock Model

use serde::{Deserialize, Serialize};

use super::combination::CombinationKey;

/// Stock row; `variant_id = None` is the simple product row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Stock {
    pub id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(rename = "combination_key", try_from = "String"))]
    pub combination: CombinationKey,
    pub quantity: i64,
    pub reserved_quantity: i64,
    pub low_stock_threshold: i64,
    /// Derived: `quantity - reserved_quantity <= 0`
    pub is_out_of_stock: bool,
    /// Derived: available quantity at or below the threshold
    pub is_low_stock: bool,
    pub updated_at: i64,
}

impl Stock {
    pub fn available(&self) -> i64 {
        self.quantity - self.reserved_quantity
    }
}

/// Update stock payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockUpdate {
    pub quantity: Option<i64>,
    pub reserved_quantity: Option<i64>,
    pub low_stock_threshold: Option<i64>,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub created: usize,
    pub deleted: usize,
    pub kept: usize,
}
