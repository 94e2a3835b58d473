//! Media Model

use serde::{Deserialize, Serialize};

use super::combination::CombinationKey;
use super::group::{GroupInput, PricePayload, WeightPayload};

/// Uploaded media object; `product_id`/`media_group_id` are null while unlinked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Media {
    pub id: i64,
    pub product_id: Option<i64>,
    pub media_group_id: Option<i64>,
    pub url: String,
    /// Primary image of the product (at most one per product)
    pub is_primary: bool,
    /// Primary image of its media group (at most one per group)
    pub is_group_primary: bool,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Register an uploaded media object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaCreate {
    pub url: String,
}

/// One entry of a product media sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSyncItem {
    pub media_id: i64,
    #[serde(default)]
    pub combination: CombinationKey,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_group_primary: bool,
}

/// Outcome of a media sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSyncReport {
    /// Previously unattached media now linked to the product
    pub linked: usize,
    /// Media already on the product whose fields were rewritten
    pub updated: usize,
    /// Media dropped from the product
    pub unlinked: usize,
    /// Distinct media groups resolved
    pub groups: usize,
}

/// Full facet overwrite (PUT semantics). Absent sections are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetReplace {
    #[serde(default)]
    pub price_groups: Option<Vec<GroupInput<PricePayload>>>,
    #[serde(default)]
    pub weight_groups: Option<Vec<GroupInput<WeightPayload>>>,
    #[serde(default)]
    pub media: Option<Vec<MediaSyncItem>>,
}

/// Outcome of a facet overwrite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetReplaceReport {
    pub price_groups: Option<usize>,
    pub weight_groups: Option<usize>,
    pub media: Option<MediaSyncReport>,
}
