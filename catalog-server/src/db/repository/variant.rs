//! Product Variant Repository
//!
//! A variant's full combination is stored twice: serialized on the variant
//! row (unique per product) and as `variant_combination` junction rows.

use super::{MAX_BIND_PARAMS, RepoResult, placeholders};
use shared::models::{CombinationKey, ProductVariant};
use sqlx::{Executor, Sqlite, SqliteConnection};

const COLUMNS: &str = "id, product_id, combination_key, is_active, created_at";

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<ProductVariant>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ProductVariant>(&format!(
        "SELECT {COLUMNS} FROM product_variant WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn find_by_product<'e, E>(db: E, product_id: i64) -> RepoResult<Vec<ProductVariant>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ProductVariant>(&format!(
        "SELECT {COLUMNS} FROM product_variant WHERE product_id = ? ORDER BY id"
    ))
    .bind(product_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Full combination of a variant, rebuilt from its junction rows
pub async fn find_combination<'e, E>(db: E, variant_id: i64) -> RepoResult<CombinationKey>
where
    E: Executor<'e, Database = Sqlite>,
{
    let pairs = sqlx::query_as::<_, (i64, i64)>(
        "SELECT attribute_id, attribute_value_id FROM variant_combination WHERE variant_id = ?",
    )
    .bind(variant_id)
    .fetch_all(db)
    .await?;
    // Junction rows are keyed by (variant_id, attribute_id), so a conflict cannot occur
    CombinationKey::try_from_pairs(pairs)
        .map_err(|e| super::RepoError::Database(format!("Corrupt variant {variant_id}: {e}")))
}

/// Insert a variant and its junction rows
pub async fn insert(
    conn: &mut SqliteConnection,
    product_id: i64,
    combination: &CombinationKey,
) -> RepoResult<ProductVariant> {
    let now = shared::util::now_millis();
    let variant = sqlx::query_as::<_, ProductVariant>(&format!(
        "INSERT INTO product_variant (product_id, combination_key, is_active, created_at) VALUES (?1, ?2, 1, ?3) RETURNING {COLUMNS}"
    ))
    .bind(product_id)
    .bind(combination.to_string())
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    for chunk in combination.pairs().chunks(MAX_BIND_PARAMS / 3) {
        let sql = format!(
            "INSERT INTO variant_combination (variant_id, attribute_id, attribute_value_id) VALUES {}",
            vec!["(?, ?, ?)"; chunk.len()].join(", ")
        );
        let mut query = sqlx::query(&sql);
        for &(attr, value) in chunk {
            query = query.bind(variant.id).bind(attr).bind(value);
        }
        query.execute(&mut *conn).await?;
    }

    Ok(variant)
}

/// Delete variants by id (stock rows and junction rows cascade)
pub async fn delete_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<u64> {
    let mut deleted = 0;
    for chunk in ids.chunks(MAX_BIND_PARAMS) {
        let sql = format!(
            "DELETE FROM product_variant WHERE id IN ({})",
            placeholders(chunk.len())
        );
        let mut query = sqlx::query(&sql);
        for id in chunk {
            query = query.bind(id);
        }
        deleted += query.execute(&mut *conn).await?.rows_affected();
    }
    Ok(deleted)
}
