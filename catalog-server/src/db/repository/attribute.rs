//! Attribute Repository

use super::{RepoError, RepoResult, placeholders};
use shared::models::{Attribute, AttributeCreate, AttributeFull, AttributeValue};
use sqlx::{Executor, Sqlite, SqlitePool};

const VALUE_COLUMNS: &str = "id, attribute_id, label_en, label_ar, display_order, is_active";

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Attribute>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Attribute>(
        "SELECT id, name_en, name_ar, created_at, updated_at FROM attribute WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn find_full(pool: &SqlitePool, id: i64) -> RepoResult<Option<AttributeFull>> {
    let Some(attribute) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let values = find_values(pool, id).await?;
    Ok(Some(AttributeFull { attribute, values }))
}

pub async fn create(pool: &SqlitePool, data: AttributeCreate) -> RepoResult<AttributeFull> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO attribute (name_en, name_ar, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) RETURNING id",
    )
    .bind(&data.name_en)
    .bind(&data.name_ar)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for (idx, value) in data.values.iter().enumerate() {
        let display_order = value.display_order.unwrap_or(idx as i32);
        sqlx::query(
            "INSERT INTO attribute_value (attribute_id, label_en, label_ar, display_order, is_active) VALUES (?1, ?2, ?3, ?4, 1)",
        )
        .bind(id)
        .bind(&value.label_en)
        .bind(&value.label_ar)
        .bind(display_order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_full(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create attribute".into()))
}

// ── Attribute values ────────────────────────────────────────

/// All values of an attribute in display order
pub async fn find_values<'e, E>(db: E, attribute_id: i64) -> RepoResult<Vec<AttributeValue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, AttributeValue>(&format!(
        "SELECT {VALUE_COLUMNS} FROM attribute_value WHERE attribute_id = ? ORDER BY display_order, id"
    ))
    .bind(attribute_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Active values of the given attributes, ordered by attribute then display order
pub async fn find_active_values<'e, E>(
    db: E,
    attribute_ids: &[i64],
) -> RepoResult<Vec<AttributeValue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    if attribute_ids.is_empty() {
        return Ok(vec![]);
    }
    let sql = format!(
        "SELECT {VALUE_COLUMNS} FROM attribute_value WHERE is_active = 1 AND attribute_id IN ({}) ORDER BY attribute_id, display_order, id",
        placeholders(attribute_ids.len())
    );
    let mut query = sqlx::query_as::<_, AttributeValue>(&sql);
    for id in attribute_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db).await?)
}

/// Values by id (any attribute, active or not)
pub async fn find_values_by_ids<'e, E>(db: E, value_ids: &[i64]) -> RepoResult<Vec<AttributeValue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    if value_ids.is_empty() {
        return Ok(vec![]);
    }
    let sql = format!(
        "SELECT {VALUE_COLUMNS} FROM attribute_value WHERE id IN ({})",
        placeholders(value_ids.len())
    );
    let mut query = sqlx::query_as::<_, AttributeValue>(&sql);
    for id in value_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db).await?)
}

pub async fn find_value<'e, E>(db: E, value_id: i64) -> RepoResult<Option<AttributeValue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, AttributeValue>(&format!(
        "SELECT {VALUE_COLUMNS} FROM attribute_value WHERE id = ?"
    ))
    .bind(value_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn set_value_active(
    pool: &SqlitePool,
    value_id: i64,
    is_active: bool,
) -> RepoResult<AttributeValue> {
    let rows = sqlx::query("UPDATE attribute_value SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(value_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Attribute value {value_id} not found"
        )));
    }
    find_value(pool, value_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Attribute value {value_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;
    use shared::models::AttributeValueCreate;

    fn value(label: &str) -> AttributeValueCreate {
        AttributeValueCreate {
            label_en: label.to_string(),
            label_ar: String::new(),
            display_order: None,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_value_order() {
        let pool = test_pool().await;
        let full = create(
            &pool,
            AttributeCreate {
                name_en: "Size".into(),
                name_ar: "المقاس".into(),
                values: vec![value("S"), value("M"), value("L")],
            },
        )
        .await
        .unwrap();

        assert_eq!(full.attribute.name_ar, "المقاس");
        let labels: Vec<_> = full.values.iter().map(|v| v.label_en.as_str()).collect();
        assert_eq!(labels, ["S", "M", "L"]);
        assert!(full.values.iter().all(|v| v.is_active));
    }

    #[tokio::test]
    async fn test_active_values_skip_inactive() {
        let pool = test_pool().await;
        let full = create(
            &pool,
            AttributeCreate {
                name_en: "Color".into(),
                name_ar: String::new(),
                values: vec![value("Red"), value("Blue")],
            },
        )
        .await
        .unwrap();
        let blue = full.values[1].id;

        let updated = set_value_active(&pool, blue, false).await.unwrap();
        assert!(!updated.is_active);

        let active = find_active_values(&pool, &[full.attribute.id]).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label_en, "Red");
    }

    #[tokio::test]
    async fn test_set_value_active_unknown() {
        let pool = test_pool().await;
        let err = set_value_active(&pool, 999, true).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
