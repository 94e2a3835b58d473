//! Product overwrite (PUT semantics)
//!
//! Replaces every facet section present in the request in one transaction.
//! All sections are validated before the first write; an absent section is
//! left as is.

use shared::models::{FacetReplace, FacetReplaceReport};

use super::catalog::CatalogService;
use super::error::CatalogResult;
use super::facet_group::{prepare_bulk_in, replace_all_in};
use super::media_group::{sync_media_in, validate_media_sync_in};
use crate::db::repository::product;

impl CatalogService {
    pub async fn replace_product_facets(
        &self,
        product_id: i64,
        data: FacetReplace,
    ) -> CatalogResult<FacetReplaceReport> {
        self.require_product(product_id).await?;

        let _guard = self.locks.lock(product_id).await;
        let mut tx = self.pool.begin().await?;

        let price_groups = match &data.price_groups {
            Some(items) => Some(prepare_bulk_in(&mut tx, product_id, items).await?),
            None => None,
        };
        let weight_groups = match &data.weight_groups {
            Some(items) => Some(prepare_bulk_in(&mut tx, product_id, items).await?),
            None => None,
        };
        if let Some(items) = &data.media {
            validate_media_sync_in(&mut tx, product_id, items).await?;
        }

        let mut report = FacetReplaceReport::default();
        if let Some(items) = &price_groups {
            report.price_groups =
                Some(replace_all_in(&mut tx, product_id, items, self.bulk_chunk_size).await?);
        }
        if let Some(items) = &weight_groups {
            report.weight_groups =
                Some(replace_all_in(&mut tx, product_id, items, self.bulk_chunk_size).await?);
        }
        if let Some(items) = &data.media {
            report.media = Some(sync_media_in(&mut tx, product_id, items).await?);
        }
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;

        crate::audit_log!(
            "replace_product_facets",
            format!("product:{product_id}"),
            format!(
                "price_groups={:?} weight_groups={:?} media={:?}",
                report.price_groups,
                report.weight_groups,
                report.media.map(|m| m.linked + m.updated)
            )
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;
    use crate::services::error::CatalogError;
    use shared::models::{
        CombinationKey, GroupInput, MediaCreate, MediaSyncItem, PricePayload, ProductCreate,
        WeightPayload,
    };

    #[tokio::test]
    async fn test_replace_is_all_or_nothing() {
        let catalog = CatalogService::new(test_pool().await);
        let product = catalog
            .create_product(ProductCreate {
                name_en: "Desk".into(),
                name_ar: String::new(),
            })
            .await
            .unwrap();
        let image = catalog
            .register_media(MediaCreate {
                url: "https://cdn.example.com/desk.jpg".into(),
            })
            .await
            .unwrap();

        let price = GroupInput::simple(PricePayload {
            cost: None,
            price: 120.0,
            sale_price: None,
        });
        let weight = GroupInput::simple(WeightPayload {
            weight: 14.0,
            length: Some(120.0),
            width: Some(60.0),
            height: Some(75.0),
        });

        // valid groups, invalid media: nothing is written
        let err = catalog
            .replace_product_facets(
                product.id,
                FacetReplace {
                    price_groups: Some(vec![price.clone()]),
                    weight_groups: Some(vec![weight.clone()]),
                    media: Some(vec![MediaSyncItem {
                        media_id: 4_040,
                        combination: CombinationKey::empty(),
                        sort_order: 0,
                        is_primary: false,
                        is_group_primary: false,
                    }]),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::PartialFailure(_)));
        assert!(catalog.price_groups().list_for_product(product.id).await.unwrap().is_empty());

        let report = catalog
            .replace_product_facets(
                product.id,
                FacetReplace {
                    price_groups: Some(vec![price]),
                    weight_groups: Some(vec![weight]),
                    media: Some(vec![MediaSyncItem {
                        media_id: image.id,
                        combination: CombinationKey::empty(),
                        sort_order: 0,
                        is_primary: true,
                        is_group_primary: true,
                    }]),
                },
            )
            .await
            .unwrap();
        assert_eq!(report.price_groups, Some(1));
        assert_eq!(report.weight_groups, Some(1));
        assert_eq!(report.media.unwrap().linked, 1);

        // absent sections stay untouched
        let report = catalog
            .replace_product_facets(
                product.id,
                FacetReplace {
                    price_groups: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(report.price_groups, Some(0));
        assert!(report.media.is_none());
        assert!(catalog.price_groups().list_for_product(product.id).await.unwrap().is_empty());
        assert_eq!(catalog.weight_groups().list_for_product(product.id).await.unwrap().len(), 1);
        assert_eq!(catalog.list_media(product.id).await.unwrap().len(), 1);
    }
}
