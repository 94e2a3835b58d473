//! Product ↔ Attribute binding

use serde::{Deserialize, Serialize};

use super::group::Facet;

/// An attribute attached to a product, with the facets it controls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductAttribute {
    pub id: i64,
    pub product_id: i64,
    pub attribute_id: i64,
    pub controls_pricing: bool,
    pub controls_media: bool,
    pub controls_weight: bool,
    pub created_at: i64,
}

impl ProductAttribute {
    pub fn controls(&self, facet: Facet) -> bool {
        match facet {
            Facet::Price => self.controls_pricing,
            Facet::Weight => self.controls_weight,
            Facet::Media => self.controls_media,
        }
    }
}

/// Facet roles of a binding. An attribute may control any subset of facets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRoles {
    #[serde(default)]
    pub controls_pricing: bool,
    #[serde(default)]
    pub controls_media: bool,
    #[serde(default)]
    pub controls_weight: bool,
}

/// Attach attribute payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAttributeCreate {
    pub attribute_id: i64,
    #[serde(flatten)]
    pub roles: FacetRoles,
}
