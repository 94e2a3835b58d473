//! Stock Repository

use super::{RepoError, RepoResult};
use shared::models::{Stock, StockUpdate};
use sqlx::{Executor, Sqlite, SqliteConnection};

/// `is_out_of_stock` / `is_low_stock` are derived on read
const COLUMNS: &str = "id, product_id, variant_id, combination_key, quantity, reserved_quantity, low_stock_threshold, \
     (quantity - reserved_quantity) <= 0 AS is_out_of_stock, \
     (quantity - reserved_quantity) <= low_stock_threshold AS is_low_stock, \
     updated_at";

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Stock>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Stock>(&format!("SELECT {COLUMNS} FROM stock WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Stock rows of a product; the simple row (if any) comes first
pub async fn find_by_product<'e, E>(db: E, product_id: i64) -> RepoResult<Vec<Stock>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Stock>(&format!(
        "SELECT {COLUMNS} FROM stock WHERE product_id = ? ORDER BY variant_id IS NOT NULL, combination_key, id"
    ))
    .bind(product_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Zero-quantity stock row for a freshly created variant
pub async fn insert_for_variant(
    conn: &mut SqliteConnection,
    product_id: i64,
    variant_id: i64,
    combination_key: &str,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO stock (product_id, variant_id, combination_key, quantity, reserved_quantity, low_stock_threshold, updated_at) VALUES (?1, ?2, ?3, 0, 0, 0, ?4)",
    )
    .bind(product_id)
    .bind(variant_id)
    .bind(combination_key)
    .bind(shared::util::now_millis())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Apply a validated update; absent fields keep their value
pub async fn update<'e, E>(db: E, id: i64, data: &StockUpdate) -> RepoResult<Stock>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Stock>(&format!(
        "UPDATE stock SET quantity = COALESCE(?1, quantity), reserved_quantity = COALESCE(?2, reserved_quantity), \
         low_stock_threshold = COALESCE(?3, low_stock_threshold), updated_at = ?4 WHERE id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(data.quantity)
    .bind(data.reserved_quantity)
    .bind(data.low_stock_threshold)
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(db)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Stock {id} not found")))
}
