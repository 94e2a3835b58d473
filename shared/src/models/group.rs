//! Facet groups (price / weight / media)
//!
//! All three facets share one shape: a group row keyed by a
//! [`CombinationKey`] plus a facet-specific payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::combination::CombinationKey;

/// Independently grouped product aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Price,
    Weight,
    Media,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Price, Facet::Weight, Facet::Media];

    pub fn name(&self) -> &'static str {
        match self {
            Facet::Price => "price",
            Facet::Weight => "weight",
            Facet::Media => "media",
        }
    }

    /// Binding column that marks an attribute as controlling this facet
    pub fn role_column(&self) -> &'static str {
        match self {
            Facet::Price => "controls_pricing",
            Facet::Weight => "controls_weight",
            Facet::Media => "controls_media",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One defining `(attribute, value)` pair of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GroupValue {
    pub group_id: i64,
    pub attribute_id: i64,
    pub attribute_value_id: i64,
}

/// Price facet payload (currency unit, 2 decimals)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePayload {
    /// Informational only
    #[serde(default)]
    pub cost: Option<f64>,
    pub price: f64,
    /// Must not exceed `price`
    #[serde(default)]
    pub sale_price: Option<f64>,
}

impl PricePayload {
    /// Price charged at checkout
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }
}

/// Weight / dimension facet payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPayload {
    pub weight: f64,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Media groups carry no payload; media rows attach to them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPayload {}

/// Stored facet group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetGroup<P> {
    pub id: i64,
    pub product_id: i64,
    pub combination: CombinationKey,
    #[serde(flatten)]
    pub payload: P,
    pub created_at: i64,
    pub updated_at: i64,
}

pub type PriceGroup = FacetGroup<PricePayload>;
pub type WeightGroup = FacetGroup<WeightPayload>;
pub type MediaGroup = FacetGroup<MediaPayload>;

/// Write request for one group: combination (empty = simple group) + payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInput<P> {
    #[serde(default)]
    pub combination: CombinationKey,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> GroupInput<P> {
    pub fn new(combination: CombinationKey, payload: P) -> Self {
        Self {
            combination,
            payload,
        }
    }

    pub fn simple(payload: P) -> Self {
        Self::new(CombinationKey::empty(), payload)
    }
}
