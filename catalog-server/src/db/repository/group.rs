//! Facet Group Repository
//!
//! Price, weight and media groups share one table shape:
//!
//! ```text
//! {facet}_group       (id, product_id, combination_key, <payload columns>, created_at, updated_at)
//! {facet}_group_value (group_id, attribute_id, attribute_value_id)
//! ```
//!
//! [`GroupStore`] is the single keyed store for all three; a facet only
//! describes its tables and payload columns through [`GroupPayload`].

use super::{MAX_BIND_PARAMS, RepoResult, placeholders};
use shared::models::{
    CombinationKey, Facet, FacetGroup, GroupInput, GroupValue, MediaPayload, PricePayload,
    WeightPayload,
};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Executor, Row, Sqlite, SqliteConnection};
use std::collections::HashMap;
use std::marker::PhantomData;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Facet-specific part of a group row
pub trait GroupPayload: Clone + Send + Sync + Unpin + 'static {
    const FACET: Facet;
    const TABLE: &'static str;
    const VALUE_TABLE: &'static str;
    /// Payload columns, in bind order
    const COLUMNS: &'static [&'static str];

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    fn bind_to<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

impl GroupPayload for PricePayload {
    const FACET: Facet = Facet::Price;
    const TABLE: &'static str = "price_group";
    const VALUE_TABLE: &'static str = "price_group_value";
    const COLUMNS: &'static [&'static str] = &["cost", "price", "sale_price"];

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            cost: row.try_get("cost")?,
            price: row.try_get("price")?,
            sale_price: row.try_get("sale_price")?,
        })
    }

    fn bind_to<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.cost).bind(self.price).bind(self.sale_price)
    }
}

impl GroupPayload for WeightPayload {
    const FACET: Facet = Facet::Weight;
    const TABLE: &'static str = "weight_group";
    const VALUE_TABLE: &'static str = "weight_group_value";
    const COLUMNS: &'static [&'static str] = &["weight", "length", "width", "height"];

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            weight: row.try_get("weight")?,
            length: row.try_get("length")?,
            width: row.try_get("width")?,
            height: row.try_get("height")?,
        })
    }

    fn bind_to<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.weight)
            .bind(self.length)
            .bind(self.width)
            .bind(self.height)
    }
}

impl GroupPayload for MediaPayload {
    const FACET: Facet = Facet::Media;
    const TABLE: &'static str = "media_group";
    const VALUE_TABLE: &'static str = "media_group_value";
    const COLUMNS: &'static [&'static str] = &[];

    fn decode(_row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {})
    }

    fn bind_to<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
    }
}

/// Keyed group store for one facet
pub struct GroupStore<P>(PhantomData<P>);

pub type PriceGroups = GroupStore<PricePayload>;
pub type WeightGroups = GroupStore<WeightPayload>;
pub type MediaGroups = GroupStore<MediaPayload>;

impl<P: GroupPayload> GroupStore<P> {
    fn select_columns() -> String {
        let mut cols = vec!["id", "product_id", "combination_key"];
        cols.extend_from_slice(P::COLUMNS);
        cols.extend_from_slice(&["created_at", "updated_at"]);
        cols.join(", ")
    }

    /// Columns written on insert, after `product_id, combination_key`
    fn insert_columns() -> String {
        let mut cols = vec!["product_id", "combination_key"];
        cols.extend_from_slice(P::COLUMNS);
        cols.extend_from_slice(&["created_at", "updated_at"]);
        cols.join(", ")
    }

    fn params_per_group() -> usize {
        P::COLUMNS.len() + 4
    }

    fn decode_group(row: &SqliteRow) -> Result<FacetGroup<P>, sqlx::Error> {
        let key: String = row.try_get("combination_key")?;
        let combination = key
            .parse::<CombinationKey>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "combination_key".into(),
                source: Box::new(e),
            })?;
        Ok(FacetGroup {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            combination,
            payload: P::decode(row)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    // ── Reads ───────────────────────────────────────────────

    /// All groups of a product, oldest first
    pub async fn list_for_product<'e, E>(db: E, product_id: i64) -> RepoResult<Vec<FacetGroup<P>>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE product_id = ? ORDER BY id",
            Self::select_columns(),
            P::TABLE
        );
        let rows = sqlx::query(&sql).bind(product_id).fetch_all(db).await?;
        let groups = rows
            .iter()
            .map(Self::decode_group)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    /// Defining value rows of every group of a product
    pub async fn list_values<'e, E>(db: E, product_id: i64) -> RepoResult<Vec<GroupValue>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "SELECT v.group_id, v.attribute_id, v.attribute_value_id FROM {} v JOIN {} g ON g.id = v.group_id WHERE g.product_id = ?",
            P::VALUE_TABLE,
            P::TABLE
        );
        let rows = sqlx::query_as::<_, GroupValue>(&sql)
            .bind(product_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<FacetGroup<P>>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            Self::select_columns(),
            P::TABLE
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(db).await?;
        Ok(row.as_ref().map(Self::decode_group).transpose()?)
    }

    /// Direct lookup through the unique serialized key
    pub async fn find_by_key<'e, E>(
        db: E,
        product_id: i64,
        key: &CombinationKey,
    ) -> RepoResult<Option<FacetGroup<P>>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE product_id = ? AND combination_key = ?",
            Self::select_columns(),
            P::TABLE
        );
        let row = sqlx::query(&sql)
            .bind(product_id)
            .bind(key.to_string())
            .fetch_optional(db)
            .await?;
        Ok(row.as_ref().map(Self::decode_group).transpose()?)
    }

    /// Ids of the product's groups whose key references `attribute_id`
    pub async fn find_ids_by_attribute<'e, E>(
        db: E,
        product_id: i64,
        attribute_id: i64,
    ) -> RepoResult<Vec<i64>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "SELECT DISTINCT g.id FROM {} g JOIN {} v ON v.group_id = g.id WHERE g.product_id = ? AND v.attribute_id = ? ORDER BY g.id",
            P::TABLE,
            P::VALUE_TABLE
        );
        let ids = sqlx::query_scalar::<_, i64>(&sql)
            .bind(product_id)
            .bind(attribute_id)
            .fetch_all(db)
            .await?;
        Ok(ids)
    }

    // ── Writes (caller owns the transaction) ────────────────

    /// Insert one group row plus its value rows
    pub async fn insert(
        conn: &mut SqliteConnection,
        product_id: i64,
        combination: &CombinationKey,
        payload: &P,
    ) -> RepoResult<FacetGroup<P>> {
        let now = shared::util::now_millis();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            P::TABLE,
            Self::insert_columns(),
            placeholders(Self::params_per_group()),
            Self::select_columns()
        );
        let query = sqlx::query(&sql)
            .bind(product_id)
            .bind(combination.to_string());
        let row = payload
            .bind_to(query)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;
        let group = Self::decode_group(&row)?;

        let values: Vec<(i64, i64, i64)> = combination
            .pairs()
            .iter()
            .map(|&(attr, value)| (group.id, attr, value))
            .collect();
        Self::insert_values(conn, &values).await?;

        Ok(group)
    }

    /// Overwrite the payload of an existing group in place
    pub async fn update_payload<'e, E>(db: E, id: i64, payload: &P) -> RepoResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let assignments: String = P::COLUMNS.iter().map(|c| format!("{c} = ?, ")).collect();
        let sql = format!(
            "UPDATE {} SET {assignments}updated_at = ? WHERE id = ?",
            P::TABLE
        );
        let rows = payload
            .bind_to(sqlx::query(&sql))
            .bind(shared::util::now_millis())
            .bind(id)
            .execute(db)
            .await?;
        Ok(rows.rows_affected() > 0)
    }

    /// Insert many groups, chunked to stay under the bound-parameter cap.
    ///
    /// Keys must be distinct and absent from the product. Returns the new
    /// group id for every serialized key.
    pub async fn bulk_insert(
        conn: &mut SqliteConnection,
        product_id: i64,
        items: &[GroupInput<P>],
        chunk_size: usize,
    ) -> RepoResult<HashMap<String, i64>> {
        let now = shared::util::now_millis();
        let per_group = Self::params_per_group();
        let chunk_size = chunk_size.clamp(1, MAX_BIND_PARAMS / per_group);
        let row_placeholders = format!("({})", placeholders(per_group));

        let mut ids: HashMap<String, i64> = HashMap::with_capacity(items.len());
        for chunk in items.chunks(chunk_size) {
            let sql = format!(
                "INSERT INTO {} ({}) VALUES {} RETURNING id, combination_key",
                P::TABLE,
                Self::insert_columns(),
                vec![row_placeholders.as_str(); chunk.len()].join(", ")
            );
            let mut query = sqlx::query(&sql);
            for item in chunk {
                query = query.bind(product_id).bind(item.combination.to_string());
                query = item.payload.bind_to(query).bind(now).bind(now);
            }
            // RETURNING order is unspecified for multi-row inserts; map by key
            for row in query.fetch_all(&mut *conn).await? {
                ids.insert(row.try_get("combination_key")?, row.try_get("id")?);
            }
        }

        let mut values = Vec::new();
        for item in items {
            if let Some(&group_id) = ids.get(&item.combination.to_string()) {
                values.extend(
                    item.combination
                        .pairs()
                        .iter()
                        .map(|&(attr, value)| (group_id, attr, value)),
                );
            }
        }
        Self::insert_values(conn, &values).await?;

        Ok(ids)
    }

    async fn insert_values(
        conn: &mut SqliteConnection,
        values: &[(i64, i64, i64)],
    ) -> RepoResult<()> {
        for chunk in values.chunks(MAX_BIND_PARAMS / 3) {
            let sql = format!(
                "INSERT INTO {} (group_id, attribute_id, attribute_value_id) VALUES {}",
                P::VALUE_TABLE,
                vec!["(?, ?, ?)"; chunk.len()].join(", ")
            );
            let mut query = sqlx::query(&sql);
            for &(group_id, attr, value) in chunk {
                query = query.bind(group_id).bind(attr).bind(value);
            }
            query.execute(&mut *conn).await?;
        }
        Ok(())
    }

    /// Delete every group of a product (value rows cascade)
    pub async fn delete_all_for_product<'e, E>(db: E, product_id: i64) -> RepoResult<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("DELETE FROM {} WHERE product_id = ?", P::TABLE);
        let rows = sqlx::query(&sql).bind(product_id).execute(db).await?;
        Ok(rows.rows_affected())
    }

    pub async fn delete_by_ids<'e, E>(db: E, ids: &[i64]) -> RepoResult<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        if ids.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "DELETE FROM {} WHERE id IN ({})",
            P::TABLE,
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for &id in ids {
            query = query.bind(id);
        }
        Ok(query.execute(db).await?.rows_affected())
    }
}
