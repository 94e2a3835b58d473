//! Variant → facet resolution (read path)
//!
//! Each facet resolves independently: the variant's full combination is
//! restricted to the attributes controlling that facet, then matched
//! exactly. A facet no attribute controls resolves to the simple group.

use shared::models::{
    CheckoutQuote, MediaPayload, PricePayload, VariantResolution, WeightPayload,
};

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult, EntityKind};
use super::facet_group::{facet_key, match_group_in};
use crate::db::repository::{binding, media, variant};

impl CatalogService {
    pub async fn resolve_variant(&self, variant_id: i64) -> CatalogResult<VariantResolution> {
        let mut conn = self.pool.acquire().await?;
        let found = variant::find_by_id(&mut *conn, variant_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Variant, variant_id))?;
        let product_id = found.product_id;
        let bindings = binding::find_by_product(&mut *conn, product_id).await?;
        let full = variant::find_combination(&mut *conn, variant_id).await?;

        let price_key = facet_key::<PricePayload>(&full, &bindings);
        let weight_key = facet_key::<WeightPayload>(&full, &bindings);
        let media_key = facet_key::<MediaPayload>(&full, &bindings);

        let price_group = match_group_in::<PricePayload>(&mut conn, product_id, &price_key).await?;
        let weight_group = match_group_in::<WeightPayload>(&mut conn, product_id, &weight_key).await?;
        let media_group = match_group_in::<MediaPayload>(&mut conn, product_id, &media_key).await?;
        let media = match &media_group {
            Some(group) => media::find_by_group(&mut *conn, group.id).await?,
            None => Vec::new(),
        };

        tracing::debug!(
            variant_id,
            price_group = ?price_group.as_ref().map(|g| g.id),
            weight_group = ?weight_group.as_ref().map(|g| g.id),
            media_group = ?media_group.as_ref().map(|g| g.id),
            "Variant resolved"
        );
        Ok(VariantResolution {
            variant: found,
            price_group,
            weight_group,
            media_group,
            media,
        })
    }

    /// Price and weight for the cart; either one missing fails the quote
    pub async fn checkout(&self, variant_id: i64) -> CatalogResult<CheckoutQuote> {
        let (price_group_id, price) = self.checkout_price(variant_id).await?;
        let (weight_group_id, weight) = self.checkout_weight(variant_id).await?;
        Ok(CheckoutQuote {
            variant_id,
            price_group_id,
            price: price.price,
            sale_price: price.sale_price,
            effective_price: price.effective_price(),
            weight_group_id,
            weight: weight.weight,
        })
    }
}
