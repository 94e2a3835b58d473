//! Media Repository
//!
//! Media rows are produced by the upload service; this module only links,
//! reorders and unlinks them.

use super::{RepoError, RepoResult, placeholders};
use shared::models::Media;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, product_id, media_group_id, url, is_primary, is_group_primary, sort_order, created_at, updated_at";

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Media>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Media>(&format!("SELECT {COLUMNS} FROM media WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn find_by_ids<'e, E>(db: E, ids: &[i64]) -> RepoResult<Vec<Media>>
where
    E: Executor<'e, Database = Sqlite>,
{
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let sql = format!(
        "SELECT {COLUMNS} FROM media WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, Media>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db).await?)
}

pub async fn find_by_product<'e, E>(db: E, product_id: i64) -> RepoResult<Vec<Media>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Media>(&format!(
        "SELECT {COLUMNS} FROM media WHERE product_id = ? ORDER BY sort_order, id"
    ))
    .bind(product_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_group<'e, E>(db: E, media_group_id: i64) -> RepoResult<Vec<Media>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Media>(&format!(
        "SELECT {COLUMNS} FROM media WHERE media_group_id = ? ORDER BY is_group_primary DESC, sort_order, id"
    ))
    .bind(media_group_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Register an uploaded object (unattached)
pub async fn create(pool: &SqlitePool, url: &str) -> RepoResult<Media> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, Media>(&format!(
        "INSERT INTO media (product_id, media_group_id, url, is_primary, is_group_primary, sort_order, created_at, updated_at) \
         VALUES (NULL, NULL, ?1, 0, 0, 0, ?2, ?2) RETURNING {COLUMNS}"
    ))
    .bind(url)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Link a media row to a product/group and set its placement
pub async fn link<'e, E>(
    db: E,
    id: i64,
    product_id: i64,
    media_group_id: i64,
    sort_order: i32,
    is_primary: bool,
    is_group_primary: bool,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE media SET product_id = ?1, media_group_id = ?2, sort_order = ?3, is_primary = ?4, is_group_primary = ?5, updated_at = ?6 WHERE id = ?7",
    )
    .bind(product_id)
    .bind(media_group_id)
    .bind(sort_order)
    .bind(is_primary)
    .bind(is_group_primary)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Media {id} not found")));
    }
    Ok(())
}

/// Clear both primary flags on every media of a product
pub async fn clear_primary_flags<'e, E>(db: E, product_id: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE media SET is_primary = 0, is_group_primary = 0 WHERE product_id = ?")
        .bind(product_id)
        .execute(db)
        .await?;
    Ok(())
}

/// Detach media from their product and group, resetting placement
pub async fn unlink(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let mut unlinked = 0;
    for chunk in ids.chunks(super::MAX_BIND_PARAMS - 1) {
        let sql = format!(
            "UPDATE media SET product_id = NULL, media_group_id = NULL, is_primary = 0, is_group_primary = 0, sort_order = 0, updated_at = ? WHERE id IN ({})",
            placeholders(chunk.len())
        );
        let mut query = sqlx::query(&sql).bind(now);
        for id in chunk {
            query = query.bind(id);
        }
        unlinked += query.execute(&mut *conn).await?.rows_affected();
    }
    Ok(unlinked)
}

/// Move all media of the given groups into `target_group_id`.
/// Group-primary flags are dropped since the target keeps its own.
pub async fn move_to_group<'e, E>(db: E, from_group_ids: &[i64], target_group_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    if from_group_ids.is_empty() {
        return Ok(0);
    }
    let sql = format!(
        "UPDATE media SET media_group_id = ?, is_group_primary = 0, updated_at = ? WHERE media_group_id IN ({})",
        placeholders(from_group_ids.len())
    );
    let mut query = sqlx::query(&sql)
        .bind(target_group_id)
        .bind(shared::util::now_millis());
    for &id in from_group_ids {
        query = query.bind(id);
    }
    Ok(query.execute(db).await?.rows_affected())
}
