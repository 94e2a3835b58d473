//! Product Attribute Binding Repository

use super::{RepoError, RepoResult};
use shared::models::{FacetRoles, ProductAttribute};
use sqlx::{Executor, Sqlite};

const COLUMNS: &str =
    "id, product_id, attribute_id, controls_pricing, controls_media, controls_weight, created_at";

/// Bindings of a product, ordered by attribute id
pub async fn find_by_product<'e, E>(db: E, product_id: i64) -> RepoResult<Vec<ProductAttribute>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ProductAttribute>(&format!(
        "SELECT {COLUMNS} FROM product_attribute WHERE product_id = ? ORDER BY attribute_id"
    ))
    .bind(product_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find<'e, E>(
    db: E,
    product_id: i64,
    attribute_id: i64,
) -> RepoResult<Option<ProductAttribute>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ProductAttribute>(&format!(
        "SELECT {COLUMNS} FROM product_attribute WHERE product_id = ? AND attribute_id = ?"
    ))
    .bind(product_id)
    .bind(attribute_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Insert a binding, or overwrite the roles of an existing one
pub async fn upsert<'e, E>(
    db: E,
    product_id: i64,
    attribute_id: i64,
    roles: FacetRoles,
) -> RepoResult<ProductAttribute>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, ProductAttribute>(&format!(
        "INSERT INTO product_attribute (product_id, attribute_id, controls_pricing, controls_media, controls_weight, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT (product_id, attribute_id) DO UPDATE SET \
         controls_pricing = excluded.controls_pricing, controls_media = excluded.controls_media, controls_weight = excluded.controls_weight \
         RETURNING {COLUMNS}"
    ))
    .bind(product_id)
    .bind(attribute_id)
    .bind(roles.controls_pricing)
    .bind(roles.controls_media)
    .bind(roles.controls_weight)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update_roles<'e, E>(
    db: E,
    product_id: i64,
    attribute_id: i64,
    roles: FacetRoles,
) -> RepoResult<ProductAttribute>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ProductAttribute>(&format!(
        "UPDATE product_attribute SET controls_pricing = ?1, controls_media = ?2, controls_weight = ?3 \
         WHERE product_id = ?4 AND attribute_id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(roles.controls_pricing)
    .bind(roles.controls_media)
    .bind(roles.controls_weight)
    .bind(product_id)
    .bind(attribute_id)
    .fetch_optional(db)
    .await?;
    row.ok_or_else(|| {
        RepoError::NotFound(format!(
            "Attribute {attribute_id} is not bound to product {product_id}"
        ))
    })
}

pub async fn delete<'e, E>(db: E, product_id: i64, attribute_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM product_attribute WHERE product_id = ? AND attribute_id = ?")
        .bind(product_id)
        .bind(attribute_id)
        .execute(db)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{attribute, product, testing::test_pool};
    use shared::models::{AttributeCreate, ProductCreate};

    #[tokio::test]
    async fn test_upsert_overwrites_roles() {
        let pool = test_pool().await;
        let p = product::create(
            &pool,
            ProductCreate {
                name_en: "Shoe".into(),
                name_ar: String::new(),
            },
        )
        .await
        .unwrap();
        let a = attribute::create(
            &pool,
            AttributeCreate {
                name_en: "Size".into(),
                name_ar: String::new(),
                values: vec![],
            },
        )
        .await
        .unwrap();

        let pricing = FacetRoles {
            controls_pricing: true,
            ..Default::default()
        };
        let first = upsert(&pool, p.id, a.attribute.id, pricing).await.unwrap();
        assert!(first.controls_pricing);
        assert!(!first.controls_weight);

        let weight = FacetRoles {
            controls_weight: true,
            ..Default::default()
        };
        let second = upsert(&pool, p.id, a.attribute.id, weight).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(!second.controls_pricing);
        assert!(second.controls_weight);

        assert_eq!(find_by_product(&pool, p.id).await.unwrap().len(), 1);
        assert!(delete(&pool, p.id, a.attribute.id).await.unwrap());
        assert!(find(&pool, p.id, a.attribute.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_roles_requires_binding() {
        let pool = test_pool().await;
        let err = update_roles(&pool, 1, 1, FacetRoles::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
