//! Catalog Service
//!
//! Entry point of the grouping engine. Owns the pool, the per-product write
//! locks and the bulk-insert chunk size; the engine operations themselves
//! live in the sibling modules as further `impl CatalogService` blocks.

use shared::models::{
    AttributeCreate, AttributeFull, AttributeValue, Product, ProductCreate,
};
use sqlx::SqlitePool;

use super::error::{CatalogError, CatalogResult, EntityKind};
use super::locks::ProductLocks;
use crate::db::repository::{attribute, product};
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};

/// Default number of groups per multi-row insert
pub const DEFAULT_BULK_CHUNK_SIZE: usize = 200;

#[derive(Clone)]
pub struct CatalogService {
    pub(crate) pool: SqlitePool,
    pub(crate) locks: ProductLocks,
    pub(crate) bulk_chunk_size: usize,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: ProductLocks::new(),
            bulk_chunk_size: DEFAULT_BULK_CHUNK_SIZE,
        }
    }

    pub fn with_bulk_chunk_size(mut self, chunk_size: usize) -> Self {
        self.bulk_chunk_size = chunk_size.max(1);
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fail with `NotFound` unless the product exists
    pub(crate) async fn require_product(&self, product_id: i64) -> CatalogResult<Product> {
        product::find_by_id(&self.pool, product_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Product, product_id))
    }

    // ── Attribute catalog ───────────────────────────────────

    pub async fn create_attribute(&self, data: AttributeCreate) -> CatalogResult<AttributeFull> {
        validate_required_text(&data.name_en, "name_en", MAX_NAME_LEN)?;
        validate_optional_text(&data.name_ar, "name_ar", MAX_NAME_LEN)?;
        for value in &data.values {
            validate_required_text(&value.label_en, "label_en", MAX_NAME_LEN)?;
            validate_optional_text(&value.label_ar, "label_ar", MAX_NAME_LEN)?;
        }

        let created = attribute::create(&self.pool, data).await?;
        tracing::info!(
            attribute_id = created.attribute.id,
            values = created.values.len(),
            "Attribute created"
        );
        Ok(created)
    }

    pub async fn find_attribute(&self, id: i64) -> CatalogResult<AttributeFull> {
        attribute::find_full(&self.pool, id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Attribute, id))
    }

    /// Toggle a value. The variant matrix only changes on the next reconcile.
    pub async fn set_value_active(
        &self,
        value_id: i64,
        is_active: bool,
    ) -> CatalogResult<AttributeValue> {
        if attribute::find_value(&self.pool, value_id).await?.is_none() {
            return Err(CatalogError::not_found(EntityKind::AttributeValue, value_id));
        }
        let value = attribute::set_value_active(&self.pool, value_id, is_active).await?;
        tracing::info!(value_id, is_active, "Attribute value toggled");
        Ok(value)
    }

    // ── Products ────────────────────────────────────────────

    pub async fn create_product(&self, data: ProductCreate) -> CatalogResult<Product> {
        validate_required_text(&data.name_en, "name_en", MAX_NAME_LEN)?;
        validate_optional_text(&data.name_ar, "name_ar", MAX_NAME_LEN)?;

        let created = product::create(&self.pool, data).await?;
        tracing::info!(product_id = created.id, "Product created");
        Ok(created)
    }

    pub async fn find_product(&self, id: i64) -> CatalogResult<Product> {
        self.require_product(id).await
    }

    /// Delete a product; groups, variants and stock cascade, media are unlinked
    pub async fn delete_product(&self, id: i64) -> CatalogResult<()> {
        let guard = self.locks.lock(id).await;
        let deleted = product::delete(&self.pool, id).await?;
        drop(guard);
        self.locks.forget(id);

        if !deleted {
            return Err(CatalogError::not_found(EntityKind::Product, id));
        }
        crate::audit_log!("delete_product", format!("product:{id}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;
    use shared::models::AttributeValueCreate;

    #[tokio::test]
    async fn test_create_attribute_rejects_blank_labels() {
        let catalog = CatalogService::new(test_pool().await);
        let err = catalog
            .create_attribute(AttributeCreate {
                name_en: "Color".into(),
                name_ar: String::new(),
                values: vec![AttributeValueCreate {
                    label_en: " ".into(),
                    label_ar: String::new(),
                    display_order: None,
                }],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_product_lifecycle() {
        let catalog = CatalogService::new(test_pool().await);
        let product = catalog
            .create_product(ProductCreate {
                name_en: "Lamp".into(),
                name_ar: "مصباح".into(),
            })
            .await
            .unwrap();

        assert_eq!(catalog.find_product(product.id).await.unwrap().name_ar, "مصباح");
        catalog.delete_product(product.id).await.unwrap();
        assert!(matches!(
            catalog.find_product(product.id).await,
            Err(CatalogError::NotFound {
                kind: EntityKind::Product,
                ..
            })
        ));
        assert!(catalog.delete_product(product.id).await.is_err());
        assert!(catalog.locks.is_empty());
    }

    #[tokio::test]
    async fn test_set_value_active_unknown() {
        let catalog = CatalogService::new(test_pool().await);
        assert!(matches!(
            catalog.set_value_active(404, false).await,
            Err(CatalogError::NotFound {
                kind: EntityKind::AttributeValue,
                id: 404
            })
        ));
    }
}
