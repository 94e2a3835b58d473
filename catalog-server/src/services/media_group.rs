//! Media groups and product media sync
//!
//! Media groups carry no payload; media rows attach to them. Two primary
//! flags are tracked independently: `is_primary` (one per product) and
//! `is_group_primary` (one per group).
//!
//! Sync is a full replace keyed by media id, in three phases:
//! resolve one group per distinct combination, apply every item, then
//! unlink media the request no longer mentions.

use shared::models::{CombinationKey, Media, MediaCreate, MediaPayload, MediaSyncItem, MediaSyncReport};
use sqlx::SqliteConnection;
use std::collections::{HashMap, HashSet};

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult, EntityKind};
use super::facet_group::{
    FacetGroups, FacetRules, Strictness, find_or_create_in, validate_combinations_in,
};
use crate::db::repository::{media, product};
use crate::utils::validation::{MAX_URL_LEN, validate_required_text};

impl FacetRules for MediaPayload {
    fn normalize(&self) -> CatalogResult<Self> {
        Ok(*self)
    }
}

/// Reject a sync request before anything is written
pub(crate) async fn validate_media_sync_in(
    conn: &mut SqliteConnection,
    product_id: i64,
    items: &[MediaSyncItem],
) -> CatalogResult<()> {
    let primaries: Vec<i64> = items
        .iter()
        .filter(|i| i.is_primary)
        .map(|i| i.media_id)
        .collect();
    if primaries.len() > 1 {
        tracing::warn!(product_id, media_ids = ?primaries, "Media sync rejected: multiple primary images");
        return Err(CatalogError::PrimaryConflict(format!(
            "media {primaries:?} are all marked primary; a product has at most one"
        )));
    }

    let mut ids = HashSet::with_capacity(items.len());
    if let Some(dup) = items.iter().find(|i| !ids.insert(i.media_id)) {
        return Err(CatalogError::InvalidPayload(format!(
            "media {} appears more than once",
            dup.media_id
        )));
    }

    let mut group_primaries: HashMap<&CombinationKey, i64> = HashMap::new();
    for item in items.iter().filter(|i| i.is_group_primary) {
        if let Some(other) = group_primaries.insert(&item.combination, item.media_id) {
            tracing::warn!(
                product_id,
                combination = %item.combination,
                "Media sync rejected: multiple group primary images"
            );
            return Err(CatalogError::PrimaryConflict(format!(
                "media {other} and {} are both group primary for combination {}",
                item.media_id, item.combination
            )));
        }
    }

    let keys: Vec<&CombinationKey> = items.iter().map(|i| &i.combination).collect();
    validate_combinations_in::<MediaPayload>(conn, product_id, &keys, Strictness::Bulk).await?;

    let wanted: Vec<i64> = items.iter().map(|i| i.media_id).collect();
    let found: HashMap<i64, Media> = media::find_by_ids(&mut *conn, &wanted)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    for id in &wanted {
        match found.get(id) {
            None => {
                return Err(CatalogError::PartialFailure(format!(
                    "media {id} does not exist"
                )));
            }
            Some(m) if m.product_id.is_some_and(|owner| owner != product_id) => {
                return Err(CatalogError::ConflictingState(format!(
                    "media {id} is linked to another product"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Apply an already-validated sync on a caller-owned transaction
pub(crate) async fn sync_media_in(
    conn: &mut SqliteConnection,
    product_id: i64,
    items: &[MediaSyncItem],
) -> CatalogResult<MediaSyncReport> {
    let mut report = MediaSyncReport::default();

    // resolve: each distinct combination exactly once
    let mut groups: HashMap<&CombinationKey, i64> = HashMap::new();
    for item in items {
        if !groups.contains_key(&item.combination) {
            let (group, _) =
                find_or_create_in(&mut *conn, product_id, &item.combination, &MediaPayload {})
                    .await?;
            groups.insert(&item.combination, group.id);
        }
    }
    report.groups = groups.len();

    // apply
    let previous = media::find_by_product(&mut *conn, product_id).await?;
    let previously_linked: HashSet<i64> = previous.iter().map(|m| m.id).collect();
    media::clear_primary_flags(&mut *conn, product_id).await?;
    for item in items {
        let group_id = groups[&item.combination];
        media::link(
            &mut *conn,
            item.media_id,
            product_id,
            group_id,
            item.sort_order,
            item.is_primary,
            item.is_group_primary,
        )
        .await?;
        if previously_linked.contains(&item.media_id) {
            report.updated += 1;
        } else {
            report.linked += 1;
        }
    }

    // reconcile orphans
    let kept: HashSet<i64> = items.iter().map(|i| i.media_id).collect();
    let orphans: Vec<i64> = previous
        .iter()
        .map(|m| m.id)
        .filter(|id| !kept.contains(id))
        .collect();
    if !orphans.is_empty() {
        report.unlinked = media::unlink(conn, &orphans).await? as usize;
    }

    tracing::info!(
        product_id,
        linked = report.linked,
        updated = report.updated,
        unlinked = report.unlinked,
        groups = report.groups,
        "Product media synced"
    );
    Ok(report)
}

impl CatalogService {
    pub fn media_groups(&self) -> FacetGroups<'_, MediaPayload> {
        self.groups()
    }

    /// Register an uploaded object; it stays unattached until a sync links it
    pub async fn register_media(&self, data: MediaCreate) -> CatalogResult<Media> {
        validate_required_text(&data.url, "url", MAX_URL_LEN)?;
        let created = media::create(&self.pool, &data.url).await?;
        tracing::debug!(media_id = created.id, "Media registered");
        Ok(created)
    }

    pub async fn find_media(&self, media_id: i64) -> CatalogResult<Media> {
        media::find_by_id(&self.pool, media_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Media, media_id))
    }

    pub async fn list_media(&self, product_id: i64) -> CatalogResult<Vec<Media>> {
        self.require_product(product_id).await?;
        Ok(media::find_by_product(&self.pool, product_id).await?)
    }

    /// Full replace of the product's media, keyed by media id
    pub async fn sync_product_media(
        &self,
        product_id: i64,
        items: Vec<MediaSyncItem>,
    ) -> CatalogResult<MediaSyncReport> {
        self.require_product(product_id).await?;

        let _guard = self.locks.lock(product_id).await;
        let mut tx = self.pool.begin().await?;
        validate_media_sync_in(&mut tx, product_id, &items).await?;
        let report = sync_media_in(&mut tx, product_id, &items).await?;
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;
        Ok(report)
    }
}
