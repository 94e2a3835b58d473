//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate};
use sqlx::{Executor, Sqlite, SqlitePool};

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Product>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Product>(
        "SELECT id, name_en, name_ar, is_active, created_at, updated_at FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Create a product together with its simple (`variant_id IS NULL`) stock row
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO product (name_en, name_ar, is_active, created_at, updated_at) VALUES (?1, ?2, 1, ?3, ?3) RETURNING id",
    )
    .bind(&data.name_en)
    .bind(&data.name_ar)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO stock (product_id, variant_id, combination_key, quantity, reserved_quantity, low_stock_threshold, updated_at) VALUES (?1, NULL, '', 0, 0, 0, ?2)",
    )
    .bind(id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Bump `updated_at` after a facet or stock change
pub async fn touch<'e, E>(db: E, id: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE product SET updated_at = ? WHERE id = ?")
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Delete a product. Bindings, groups, variants and stock cascade;
/// media are unlinked and kept.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE media SET product_id = NULL, media_group_id = NULL, is_primary = 0, is_group_primary = 0, sort_order = 0, updated_at = ? WHERE product_id = ?",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
