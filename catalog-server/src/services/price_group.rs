//! Price groups
//!
//! Pricing rules and the read paths used by search indexing and checkout.

use shared::models::{PricePayload, PriceSummary};

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult};
use super::facet_group::{FacetGroups, FacetRules};
use crate::db::repository::group::PriceGroups;
use crate::utils::validation::validate_price;

impl FacetRules for PricePayload {
    fn normalize(&self) -> CatalogResult<Self> {
        validate_price(self)
    }
}

impl CatalogService {
    pub fn price_groups(&self) -> FacetGroups<'_, PricePayload> {
        self.groups()
    }

    /// Min/max effective price over every price group of the product
    pub async fn price_summary(&self, product_id: i64) -> CatalogResult<PriceSummary> {
        self.require_product(product_id).await?;
        let groups = PriceGroups::list_for_product(&self.pool, product_id).await?;

        let effective = groups.iter().map(|g| g.payload.effective_price());
        let min_price = effective.clone().reduce(f64::min);
        let max_price = effective.reduce(f64::max);
        let simple_price = groups
            .iter()
            .find(|g| g.combination.is_empty())
            .map(|g| g.payload.effective_price());

        Ok(PriceSummary {
            product_id,
            min_price,
            max_price,
            simple_price,
            group_count: groups.len(),
        })
    }

    /// Price a variant at checkout; a missing group is an error, never zero
    pub async fn checkout_price(&self, variant_id: i64) -> CatalogResult<(i64, PricePayload)> {
        match self.price_groups().resolve_for_variant(variant_id).await? {
            Some(group) => Ok((group.id, group.payload)),
            None => {
                tracing::warn!(variant_id, "Checkout without a matching price group");
                Err(CatalogError::PricingNotConfigured { variant_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;
    use shared::models::{
        AttributeCreate, AttributeValueCreate, CombinationKey, FacetRoles, GroupInput,
        ProductAttributeCreate, ProductCreate,
    };

    fn price(amount: f64, sale: Option<f64>) -> PricePayload {
        PricePayload {
            cost: None,
            price: amount,
            sale_price: sale,
        }
    }

    async fn color_product(catalog: &CatalogService) -> (i64, i64, Vec<i64>) {
        let product = catalog
            .create_product(ProductCreate {
                name_en: "Shirt".into(),
                name_ar: String::new(),
            })
            .await
            .unwrap();
        let color = catalog
            .create_attribute(AttributeCreate {
                name_en: "Color".into(),
                name_ar: String::new(),
                values: ["Red", "Blue"]
                    .iter()
                    .map(|l| AttributeValueCreate {
                        label_en: l.to_string(),
                        label_ar: String::new(),
                        display_order: None,
                    })
                    .collect(),
            })
            .await
            .unwrap();
        catalog
            .attach_attribute(
                product.id,
                ProductAttributeCreate {
                    attribute_id: color.attribute.id,
                    roles: FacetRoles {
                        controls_pricing: true,
                        ..Default::default()
                    },
                },
            )
            .await
            .unwrap();
        let values = color.values.iter().map(|v| v.id).collect();
        (product.id, color.attribute.id, values)
    }

    #[tokio::test]
    async fn test_sale_price_above_price_rejected() {
        let catalog = CatalogService::new(test_pool().await);
        let (product_id, _, _) = color_product(&catalog).await;
        let err = catalog
            .price_groups()
            .create_simple(product_id, price(10.0, Some(12.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPrice(_)));
        assert!(catalog.price_groups().list_for_product(product_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unbound_attribute_rejected() {
        let catalog = CatalogService::new(test_pool().await);
        let (product_id, attr, values) = color_product(&catalog).await;
        let key = CombinationKey::try_from_pairs([(attr + 100, values[0])]).unwrap();
        let err = catalog
            .price_groups()
            .find_or_create(product_id, GroupInput::new(key, price(5.0, None)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCombination(_)));
    }

    #[tokio::test]
    async fn test_value_of_another_attribute_rejected() {
        let catalog = CatalogService::new(test_pool().await);
        let (product_id, color, _) = color_product(&catalog).await;
        let size = catalog
            .create_attribute(AttributeCreate {
                name_en: "Size".into(),
                name_ar: String::new(),
                values: vec![AttributeValueCreate {
                    label_en: "M".into(),
                    label_ar: String::new(),
                    display_order: None,
                }],
            })
            .await
            .unwrap();
        let key = CombinationKey::try_from_pairs([(color, size.values[0].id)]).unwrap();

        let err = catalog
            .price_groups()
            .find_or_create(product_id, GroupInput::new(key.clone(), price(5.0, None)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCombination(_)));

        let err = catalog
            .price_groups()
            .bulk_create(product_id, vec![GroupInput::new(key, price(5.0, None))])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCombination(_)));
        assert!(catalog.price_groups().list_for_product(product_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_summary_uses_effective_price() {
        let catalog = CatalogService::new(test_pool().await);
        let (product_id, attr, values) = color_product(&catalog).await;
        let items = vec![
            GroupInput::new(
                CombinationKey::try_from_pairs([(attr, values[0])]).unwrap(),
                price(20.0, Some(15.0)),
            ),
            GroupInput::new(
                CombinationKey::try_from_pairs([(attr, values[1])]).unwrap(),
                price(18.0, None),
            ),
        ];
        assert_eq!(catalog.price_groups().bulk_create(product_id, items).await.unwrap(), 2);

        let summary = catalog.price_summary(product_id).await.unwrap();
        assert_eq!(summary.min_price, Some(15.0));
        assert_eq!(summary.max_price, Some(18.0));
        assert_eq!(summary.simple_price, None);
        assert_eq!(summary.group_count, 2);
    }

    #[tokio::test]
    async fn test_bulk_duplicate_combination_rejected() {
        let catalog = CatalogService::new(test_pool().await);
        let (product_id, attr, values) = color_product(&catalog).await;
        let key = CombinationKey::try_from_pairs([(attr, values[0])]).unwrap();
        let items = vec![
            GroupInput::new(key.clone(), price(1.0, None)),
            GroupInput::new(key, price(2.0, None)),
        ];
        let err = catalog
            .price_groups()
            .bulk_create(product_id, items)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCombination(_)));
    }

    #[tokio::test]
    async fn test_bulk_unknown_value_fails_whole_request() {
        let catalog = CatalogService::new(test_pool().await);
        let (product_id, attr, values) = color_product(&catalog).await;
        catalog
            .price_groups()
            .bulk_create(
                product_id,
                vec![GroupInput::new(
                    CombinationKey::try_from_pairs([(attr, values[0])]).unwrap(),
                    price(9.0, None),
                )],
            )
            .await
            .unwrap();

        let items = vec![
            GroupInput::new(
                CombinationKey::try_from_pairs([(attr, values[1])]).unwrap(),
                price(1.0, None),
            ),
            GroupInput::new(
                CombinationKey::try_from_pairs([(attr, 9_999)]).unwrap(),
                price(2.0, None),
            ),
        ];
        let err = catalog
            .price_groups()
            .bulk_create(product_id, items)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::PartialFailure(_)));

        // previous groups untouched
        let groups = catalog.price_groups().list_for_product(product_id).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].payload.price, 9.0);
    }
}
