//! Product variants and read-path results

use serde::{Deserialize, Serialize};

use super::combination::CombinationKey;
use super::group::{MediaGroup, PriceGroup, WeightGroup};
use super::media::Media;

/// One cell of the product's variant matrix: a full attribute combination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub id: i64,
    pub product_id: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "combination_key", try_from = "String"))]
    pub combination: CombinationKey,
    pub is_active: bool,
    pub created_at: i64,
}

/// Groups governing each facet of a variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResolution {
    pub variant: ProductVariant,
    pub price_group: Option<PriceGroup>,
    pub weight_group: Option<WeightGroup>,
    pub media_group: Option<MediaGroup>,
    /// Media of the resolved media group, ordered by sort order
    pub media: Vec<Media>,
}

/// Price and weight a cart uses at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutQuote {
    pub variant_id: i64,
    pub price_group_id: i64,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub effective_price: f64,
    pub weight_group_id: i64,
    pub weight: f64,
}

/// Representative prices of a product, for search indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSummary {
    pub product_id: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Effective price of the simple group, if configured
    pub simple_price: Option<f64>,
    pub group_count: usize,
}
