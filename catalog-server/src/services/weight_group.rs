//! Weight groups

use shared::models::WeightPayload;

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult};
use super::facet_group::{FacetGroups, FacetRules};
use crate::utils::validation::validate_weight;

impl FacetRules for WeightPayload {
    fn normalize(&self) -> CatalogResult<Self> {
        validate_weight(self)
    }
}

impl CatalogService {
    pub fn weight_groups(&self) -> FacetGroups<'_, WeightPayload> {
        self.groups()
    }

    /// Weight of a variant at checkout; a missing group is an error
    pub async fn checkout_weight(&self, variant_id: i64) -> CatalogResult<(i64, WeightPayload)> {
        match self.weight_groups().resolve_for_variant(variant_id).await? {
            Some(group) => Ok((group.id, group.payload)),
            None => {
                tracing::warn!(variant_id, "Checkout without a matching weight group");
                Err(CatalogError::WeightNotConfigured { variant_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;
    use shared::models::ProductCreate;

    #[tokio::test]
    async fn test_simple_weight_group_is_unique() {
        let catalog = CatalogService::new(test_pool().await);
        let product = catalog
            .create_product(ProductCreate {
                name_en: "Mug".into(),
                name_ar: String::new(),
            })
            .await
            .unwrap();

        let first = catalog
            .weight_groups()
            .create_simple(
                product.id,
                WeightPayload {
                    weight: 0.3,
                    length: None,
                    width: None,
                    height: None,
                },
            )
            .await
            .unwrap();
        let second = catalog
            .weight_groups()
            .create_simple(
                product.id,
                WeightPayload {
                    weight: 0.456,
                    length: Some(10.0),
                    width: None,
                    height: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.payload.weight, 0.46);
        let groups = catalog.weight_groups().list_for_product(product.id).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].payload.length, Some(10.0));
    }

    #[tokio::test]
    async fn test_negative_weight_rejected() {
        let catalog = CatalogService::new(test_pool().await);
        let product = catalog
            .create_product(ProductCreate {
                name_en: "Mug".into(),
                name_ar: String::new(),
            })
            .await
            .unwrap();
        let err = catalog
            .weight_groups()
            .create_simple(
                product.id,
                WeightPayload {
                    weight: -1.0,
                    length: None,
                    width: None,
                    height: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidWeight(_)));
    }
}
