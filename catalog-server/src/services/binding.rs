//! Attribute bindings
//!
//! Binding changes reshape a product's variant space: stock is reconciled
//! after every attach/detach, and price/weight groups keyed by an attribute
//! that no longer controls the facet are pruned. Media groups are re-keyed
//! instead: their media move to the group of the same combination minus the
//! released attribute, so the remaining media attributes still resolve them.

use shared::models::{
    CombinationKey, Facet, FacetRoles, MediaPayload, PricePayload, ProductAttribute,
    ProductAttributeCreate, WeightPayload,
};
use sqlx::SqliteConnection;
use std::collections::HashMap;

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult, EntityKind};
use super::facet_group::{find_or_create_in, prune_by_attribute_in};
use super::stock::reconcile_in;
use crate::db::repository::group::MediaGroups;
use crate::db::repository::{attribute, binding, media, product};

/// Facets that `before` controls and `after` no longer does
fn released_facets(before: &ProductAttribute, after: FacetRoles) -> Vec<Facet> {
    Facet::ALL
        .into_iter()
        .filter(|&facet| {
            let still = match facet {
                Facet::Price => after.controls_pricing,
                Facet::Weight => after.controls_weight,
                Facet::Media => after.controls_media,
            };
            before.controls(facet) && !still
        })
        .collect()
}

/// Release `attribute_id` from the product's `facet` groups
async fn release_facet_in(
    conn: &mut SqliteConnection,
    product_id: i64,
    attribute_id: i64,
    facet: Facet,
) -> CatalogResult<usize> {
    match facet {
        Facet::Price => Ok(prune_by_attribute_in::<PricePayload>(conn, product_id, attribute_id)
            .await?
            .len()),
        Facet::Weight => Ok(prune_by_attribute_in::<WeightPayload>(conn, product_id, attribute_id)
            .await?
            .len()),
        Facet::Media => {
            let doomed = MediaGroups::find_ids_by_attribute(&mut *conn, product_id, attribute_id).await?;
            if doomed.is_empty() {
                return Ok(0);
            }

            // re-key each group without the released attribute; media follow
            let mut targets: HashMap<CombinationKey, Vec<i64>> = HashMap::new();
            for group in MediaGroups::list_for_product(&mut *conn, product_id).await? {
                if doomed.contains(&group.id) {
                    targets
                        .entry(group.combination.restrict_to(|attr| attr != attribute_id))
                        .or_default()
                        .push(group.id);
                }
            }

            let mut moved = 0;
            for (key, from) in &targets {
                let (target, _) =
                    find_or_create_in(&mut *conn, product_id, key, &MediaPayload {}).await?;
                moved += media::move_to_group(&mut *conn, from, target.id).await?;
            }
            MediaGroups::delete_by_ids(&mut *conn, &doomed).await?;
            tracing::info!(
                product_id,
                attribute_id,
                pruned = doomed.len(),
                rekeyed_to = targets.len(),
                moved,
                "Media groups re-keyed without released attribute"
            );
            Ok(doomed.len())
        }
    }
}

impl CatalogService {
    pub async fn list_bindings(&self, product_id: i64) -> CatalogResult<Vec<ProductAttribute>> {
        self.require_product(product_id).await?;
        Ok(binding::find_by_product(&self.pool, product_id).await?)
    }

    /// Bind an attribute (or overwrite its roles) and reconcile stock
    pub async fn attach_attribute(
        &self,
        product_id: i64,
        data: ProductAttributeCreate,
    ) -> CatalogResult<ProductAttribute> {
        self.require_product(product_id).await?;
        if attribute::find_by_id(&self.pool, data.attribute_id).await?.is_none() {
            return Err(CatalogError::not_found(EntityKind::Attribute, data.attribute_id));
        }

        let _guard = self.locks.lock(product_id).await;
        let mut tx = self.pool.begin().await?;
        if let Some(before) = binding::find(&mut *tx, product_id, data.attribute_id).await? {
            for facet in released_facets(&before, data.roles) {
                release_facet_in(&mut tx, product_id, data.attribute_id, facet).await?;
            }
        }
        let bound = binding::upsert(&mut *tx, product_id, data.attribute_id, data.roles).await?;
        let report = reconcile_in(&mut tx, product_id).await?;
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;

        tracing::info!(
            product_id,
            attribute_id = data.attribute_id,
            variants_created = report.created,
            variants_deleted = report.deleted,
            "Attribute attached"
        );
        Ok(bound)
    }

    /// Change the facet roles of an existing binding
    pub async fn update_roles(
        &self,
        product_id: i64,
        attribute_id: i64,
        roles: FacetRoles,
    ) -> CatalogResult<ProductAttribute> {
        let _guard = self.locks.lock(product_id).await;
        let mut tx = self.pool.begin().await?;
        let before = binding::find(&mut *tx, product_id, attribute_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Binding, attribute_id))?;

        for facet in released_facets(&before, roles) {
            release_facet_in(&mut tx, product_id, attribute_id, facet).await?;
        }
        let updated = binding::update_roles(&mut *tx, product_id, attribute_id, roles).await?;
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;

        tracing::info!(product_id, attribute_id, ?roles, "Binding roles updated");
        Ok(updated)
    }

    /// Unbind an attribute: prune every group keyed by it, then reconcile stock
    pub async fn detach_attribute(&self, product_id: i64, attribute_id: i64) -> CatalogResult<()> {
        let _guard = self.locks.lock(product_id).await;
        let mut tx = self.pool.begin().await?;
        if !binding::delete(&mut *tx, product_id, attribute_id).await? {
            return Err(CatalogError::not_found(EntityKind::Binding, attribute_id));
        }

        let mut pruned = 0;
        for facet in Facet::ALL {
            pruned += release_facet_in(&mut tx, product_id, attribute_id, facet).await?;
        }
        let report = reconcile_in(&mut tx, product_id).await?;
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;

        crate::audit_log!(
            "detach_attribute",
            format!("product:{product_id}"),
            format!("attribute={attribute_id} groups_pruned={pruned} variants_deleted={}", report.deleted)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;
    use shared::models::{
        AttributeCreate, AttributeValueCreate, GroupInput, MediaCreate, MediaSyncItem,
        ProductCreate,
    };

    struct Fixture {
        catalog: CatalogService,
        product_id: i64,
        color: i64,
        red: i64,
    }

    async fn fixture(roles: FacetRoles) -> Fixture {
        let catalog = CatalogService::new(test_pool().await);
        let product = catalog
            .create_product(ProductCreate {
                name_en: "Sneaker".into(),
                name_ar: String::new(),
            })
            .await
            .unwrap();
        let color = catalog
            .create_attribute(AttributeCreate {
                name_en: "Color".into(),
                name_ar: String::new(),
                values: vec![AttributeValueCreate {
                    label_en: "Red".into(),
                    label_ar: String::new(),
                    display_order: None,
                }],
            })
            .await
            .unwrap();
        catalog
            .attach_attribute(
                product.id,
                ProductAttributeCreate {
                    attribute_id: color.attribute.id,
                    roles,
                },
            )
            .await
            .unwrap();
        Fixture {
            catalog,
            product_id: product.id,
            color: color.attribute.id,
            red: color.values[0].id,
        }
    }

    const ALL_ROLES: FacetRoles = FacetRoles {
        controls_pricing: true,
        controls_media: true,
        controls_weight: true,
    };

    #[test]
    fn test_released_facets() {
        let before = ProductAttribute {
            id: 1,
            product_id: 1,
            attribute_id: 1,
            controls_pricing: true,
            controls_media: true,
            controls_weight: false,
            created_at: 0,
        };
        let after = FacetRoles {
            controls_pricing: true,
            controls_media: false,
            controls_weight: true,
        };
        assert_eq!(released_facets(&before, after), vec![Facet::Media]);
    }

    #[tokio::test]
    async fn test_attach_unknown_attribute() {
        let f = fixture(FacetRoles::default()).await;
        let err = f
            .catalog
            .attach_attribute(
                f.product_id,
                ProductAttributeCreate {
                    attribute_id: 999,
                    roles: FacetRoles::default(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotFound {
                kind: EntityKind::Attribute,
                id: 999
            }
        ));
    }

    #[tokio::test]
    async fn test_update_roles_prunes_released_price_groups() {
        let f = fixture(ALL_ROLES).await;
        let key = CombinationKey::try_from_pairs([(f.color, f.red)]).unwrap();
        f.catalog
            .price_groups()
            .find_or_create(
                f.product_id,
                GroupInput::new(
                    key,
                    PricePayload {
                        cost: None,
                        price: 12.0,
                        sale_price: None,
                    },
                ),
            )
            .await
            .unwrap();

        f.catalog
            .update_roles(
                f.product_id,
                f.color,
                FacetRoles {
                    controls_pricing: false,
                    ..ALL_ROLES
                },
            )
            .await
            .unwrap();
        assert!(f.catalog.price_groups().list_for_product(f.product_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detach_rekeys_media_onto_remaining_attribute() {
        let f = fixture(ALL_ROLES).await;
        let size = f
            .catalog
            .create_attribute(AttributeCreate {
                name_en: "Size".into(),
                name_ar: String::new(),
                values: vec![AttributeValueCreate {
                    label_en: "S".into(),
                    label_ar: String::new(),
                    display_order: None,
                }],
            })
            .await
            .unwrap();
        let (size_id, small) = (size.attribute.id, size.values[0].id);
        f.catalog
            .attach_attribute(
                f.product_id,
                ProductAttributeCreate {
                    attribute_id: size_id,
                    roles: FacetRoles {
                        controls_media: true,
                        ..Default::default()
                    },
                },
            )
            .await
            .unwrap();

        let image = f
            .catalog
            .register_media(MediaCreate {
                url: "https://cdn.example.com/red-s.jpg".into(),
            })
            .await
            .unwrap();
        f.catalog
            .sync_product_media(
                f.product_id,
                vec![MediaSyncItem {
                    media_id: image.id,
                    combination: CombinationKey::try_from_pairs([(f.color, f.red), (size_id, small)])
                        .unwrap(),
                    sort_order: 0,
                    is_primary: false,
                    is_group_primary: true,
                }],
            )
            .await
            .unwrap();

        f.catalog.detach_attribute(f.product_id, size_id).await.unwrap();

        let color_only = CombinationKey::try_from_pairs([(f.color, f.red)]).unwrap();
        let groups = f.catalog.media_groups().list_for_product(f.product_id).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].combination, color_only);

        let variant_id = f
            .catalog
            .list_stock(f.product_id)
            .await
            .unwrap()
            .iter()
            .find_map(|row| row.variant_id)
            .unwrap();
        let resolved = f.catalog.resolve_variant(variant_id).await.unwrap();
        assert_eq!(resolved.media_group.map(|g| g.id), Some(groups[0].id));
        assert_eq!(resolved.media.len(), 1);
        assert_eq!(resolved.media[0].id, image.id);
    }

    #[tokio::test]
    async fn test_detach_moves_media_to_simple_group() {
        let f = fixture(ALL_ROLES).await;
        let image = f
            .catalog
            .register_media(MediaCreate {
                url: "https://cdn.example.com/red.jpg".into(),
            })
            .await
            .unwrap();
        f.catalog
            .sync_product_media(
                f.product_id,
                vec![MediaSyncItem {
                    media_id: image.id,
                    combination: CombinationKey::try_from_pairs([(f.color, f.red)]).unwrap(),
                    sort_order: 0,
                    is_primary: true,
                    is_group_primary: true,
                }],
            )
            .await
            .unwrap();

        f.catalog.detach_attribute(f.product_id, f.color).await.unwrap();

        let groups = f.catalog.media_groups().list_for_product(f.product_id).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].combination.is_empty());
        let linked = f.catalog.list_media(f.product_id).await.unwrap();
        assert_eq!(linked[0].media_group_id, Some(groups[0].id));
        assert!(linked[0].is_primary);
        assert!(!linked[0].is_group_primary);

        // only the simple stock row remains
        assert_eq!(f.catalog.list_stock(f.product_id).await.unwrap().len(), 1);
        assert!(f.catalog.list_bindings(f.product_id).await.unwrap().is_empty());
        assert!(f.catalog.detach_attribute(f.product_id, f.color).await.is_err());
    }
}
