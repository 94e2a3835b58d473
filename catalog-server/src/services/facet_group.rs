//! Generic facet group service
//!
//! One implementation of find-or-create, simple groups, variant resolution,
//! bulk replace and pruning, shared by the price, weight and media facets.
//! Facet-specific payload rules plug in through [`FacetRules`].
//!
//! Functions suffixed `_in` run on a caller-owned transaction and never take
//! the product lock; the [`FacetGroups`] methods take the lock and own the
//! transaction.

use shared::models::{CombinationKey, FacetGroup, GroupInput, ProductAttribute};
use sqlx::SqliteConnection;
use std::collections::{HashMap, HashSet};

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult, EntityKind};
use crate::db::repository::group::{GroupPayload, GroupStore};
use crate::db::repository::{attribute, binding, product, variant};
use crate::grouping::{GroupIndex, find_matching};

/// Payload validation of one facet
pub trait FacetRules: GroupPayload {
    /// Validate and normalize (round) a payload before it is stored
    fn normalize(&self) -> CatalogResult<Self>;
}

/// How unknown ids in a combination are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strictness {
    /// Single-item write: unknown ids are `NotFound`
    Single,
    /// Bulk write: any unknown id fails the whole request
    Bulk,
}

/// Check combinations against the product's bindings for facet `P`.
///
/// Every attribute must be bound and control the facet; every value must
/// exist and belong to its attribute.
pub(crate) async fn validate_combinations_in<P: GroupPayload>(
    conn: &mut SqliteConnection,
    product_id: i64,
    keys: &[&CombinationKey],
    strictness: Strictness,
) -> CatalogResult<()> {
    let bindings = binding::find_by_product(&mut *conn, product_id).await?;
    let controlling: HashSet<i64> = bindings
        .iter()
        .filter(|b| b.controls(P::FACET))
        .map(|b| b.attribute_id)
        .collect();

    let mut value_ids: Vec<i64> = keys
        .iter()
        .flat_map(|k| k.pairs().iter().map(|(_, v)| *v))
        .collect();
    value_ids.sort_unstable();
    value_ids.dedup();
    let owners: HashMap<i64, i64> = attribute::find_values_by_ids(&mut *conn, &value_ids)
        .await?
        .into_iter()
        .map(|v| (v.id, v.attribute_id))
        .collect();

    for key in keys {
        for &(attr, value) in key.pairs() {
            if !controlling.contains(&attr) {
                return Err(CatalogError::InvalidCombination(format!(
                    "attribute {attr} does not control {} for product {product_id} (combination {key})",
                    P::FACET
                )));
            }
            match owners.get(&value) {
                None if strictness == Strictness::Bulk => {
                    return Err(CatalogError::PartialFailure(format!(
                        "attribute value {value} does not exist (combination {key})"
                    )));
                }
                None => return Err(CatalogError::not_found(EntityKind::AttributeValue, value)),
                Some(&owner) if owner != attr => {
                    return Err(CatalogError::InvalidCombination(format!(
                        "value {value} belongs to attribute {owner}, not {attr} (combination {key})"
                    )));
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Run the exact-set matcher over every group of the product
pub(crate) async fn match_group_in<P: GroupPayload>(
    conn: &mut SqliteConnection,
    product_id: i64,
    combination: &CombinationKey,
) -> CatalogResult<Option<FacetGroup<P>>> {
    let groups = GroupStore::<P>::list_for_product(&mut *conn, product_id).await?;
    let index = GroupIndex::new(GroupStore::<P>::list_values(&mut *conn, product_id).await?);
    Ok(find_matching(&groups, &index, combination).cloned())
}

/// Find the group for `combination` and overwrite its payload, or create it.
/// Returns the group and whether it was created.
pub(crate) async fn find_or_create_in<P: GroupPayload>(
    conn: &mut SqliteConnection,
    product_id: i64,
    combination: &CombinationKey,
    payload: &P,
) -> CatalogResult<(FacetGroup<P>, bool)> {
    if let Some(mut existing) = match_group_in::<P>(conn, product_id, combination).await? {
        GroupStore::<P>::update_payload(&mut *conn, existing.id, payload).await?;
        tracing::debug!(
            facet = %P::FACET,
            product_id,
            group_id = existing.id,
            combination = %combination,
            "Facet group matched, payload overwritten"
        );
        existing.payload = payload.clone();
        return Ok((existing, false));
    }

    let group = GroupStore::<P>::insert(conn, product_id, combination, payload).await?;
    tracing::debug!(
        facet = %P::FACET,
        product_id,
        group_id = group.id,
        combination = %combination,
        "Facet group created"
    );
    Ok((group, true))
}

/// Facet sub-combination of a full variant combination
pub(crate) fn facet_key<P: GroupPayload>(
    full: &CombinationKey,
    bindings: &[ProductAttribute],
) -> CombinationKey {
    let controlling: HashSet<i64> = bindings
        .iter()
        .filter(|b| b.controls(P::FACET))
        .map(|b| b.attribute_id)
        .collect();
    full.restrict_to(|attr| controlling.contains(&attr))
}

/// Group governing `P` for a variant, `None` when no group matches
pub(crate) async fn resolve_for_variant_in<P: GroupPayload>(
    conn: &mut SqliteConnection,
    product_id: i64,
    variant_id: i64,
    bindings: &[ProductAttribute],
) -> CatalogResult<Option<FacetGroup<P>>> {
    let full = variant::find_combination(&mut *conn, variant_id).await?;
    let key = facet_key::<P>(&full, bindings);
    match_group_in::<P>(conn, product_id, &key).await
}

/// Validate bulk items: payload rules, distinct keys, bound attributes
pub(crate) async fn prepare_bulk_in<P: FacetRules>(
    conn: &mut SqliteConnection,
    product_id: i64,
    items: &[GroupInput<P>],
) -> CatalogResult<Vec<GroupInput<P>>> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut prepared = Vec::with_capacity(items.len());
    for item in items {
        if !seen.insert(&item.combination) {
            return Err(CatalogError::InvalidCombination(format!(
                "combination {} appears more than once",
                item.combination
            )));
        }
        prepared.push(GroupInput::new(item.combination.clone(), item.payload.normalize()?));
    }

    let keys: Vec<&CombinationKey> = prepared.iter().map(|i| &i.combination).collect();
    validate_combinations_in::<P>(conn, product_id, &keys, Strictness::Bulk).await?;
    Ok(prepared)
}

/// Replace every group of the product with already-validated items
pub(crate) async fn replace_all_in<P: GroupPayload>(
    conn: &mut SqliteConnection,
    product_id: i64,
    items: &[GroupInput<P>],
    chunk_size: usize,
) -> CatalogResult<usize> {
    let removed = GroupStore::<P>::delete_all_for_product(&mut *conn, product_id).await?;
    let created = GroupStore::<P>::bulk_insert(conn, product_id, items, chunk_size).await?;
    tracing::info!(
        facet = %P::FACET,
        product_id,
        removed,
        created = created.len(),
        "Facet groups replaced"
    );
    Ok(created.len())
}

/// Delete the product's groups whose key references `attribute_id`
pub(crate) async fn prune_by_attribute_in<P: GroupPayload>(
    conn: &mut SqliteConnection,
    product_id: i64,
    attribute_id: i64,
) -> CatalogResult<Vec<i64>> {
    let ids = GroupStore::<P>::find_ids_by_attribute(&mut *conn, product_id, attribute_id).await?;
    if !ids.is_empty() {
        GroupStore::<P>::delete_by_ids(&mut *conn, &ids).await?;
        tracing::info!(
            facet = %P::FACET,
            product_id,
            attribute_id,
            pruned = ids.len(),
            "Facet groups pruned"
        );
    }
    Ok(ids)
}

/// Facet-scoped view of the catalog: `catalog.price_groups()`, etc.
pub struct FacetGroups<'a, P> {
    catalog: &'a CatalogService,
    _facet: std::marker::PhantomData<P>,
}

impl CatalogService {
    pub fn groups<P: FacetRules>(&self) -> FacetGroups<'_, P> {
        FacetGroups {
            catalog: self,
            _facet: std::marker::PhantomData,
        }
    }
}

impl<P: FacetRules> FacetGroups<'_, P> {
    /// Upsert the group for `input.combination`; resubmitting a key overwrites
    pub async fn find_or_create(
        &self,
        product_id: i64,
        input: GroupInput<P>,
    ) -> CatalogResult<FacetGroup<P>> {
        let catalog = self.catalog;
        catalog.require_product(product_id).await?;
        let payload = input.payload.normalize()?;

        let _guard = catalog.locks.lock(product_id).await;
        let mut tx = catalog.pool.begin().await?;
        validate_combinations_in::<P>(&mut tx, product_id, &[&input.combination], Strictness::Single)
            .await?;
        let (group, _) = find_or_create_in(&mut tx, product_id, &input.combination, &payload).await?;
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;
        Ok(group)
    }

    /// Upsert the product's simple (empty-key) group
    pub async fn create_simple(&self, product_id: i64, payload: P) -> CatalogResult<FacetGroup<P>> {
        self.find_or_create(product_id, GroupInput::simple(payload))
            .await
    }

    /// Group governing this facet for a variant; `None` means "not configured"
    pub async fn resolve_for_variant(&self, variant_id: i64) -> CatalogResult<Option<FacetGroup<P>>> {
        let mut conn = self.catalog.pool.acquire().await?;
        let variant = variant::find_by_id(&mut *conn, variant_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Variant, variant_id))?;
        let bindings = binding::find_by_product(&mut *conn, variant.product_id).await?;
        resolve_for_variant_in::<P>(&mut conn, variant.product_id, variant_id, &bindings).await
    }

    /// Replace all groups of the product (PUT semantics)
    pub async fn bulk_create(&self, product_id: i64, items: Vec<GroupInput<P>>) -> CatalogResult<usize> {
        let catalog = self.catalog;
        catalog.require_product(product_id).await?;

        let _guard = catalog.locks.lock(product_id).await;
        let mut tx = catalog.pool.begin().await?;
        let prepared = prepare_bulk_in(&mut tx, product_id, &items).await?;
        let created = replace_all_in(&mut tx, product_id, &prepared, catalog.bulk_chunk_size).await?;
        product::touch(&mut *tx, product_id).await?;
        tx.commit().await?;
        Ok(created)
    }

    pub async fn delete_all_for_product(&self, product_id: i64) -> CatalogResult<u64> {
        let catalog = self.catalog;
        let _guard = catalog.locks.lock(product_id).await;
        let removed = GroupStore::<P>::delete_all_for_product(&catalog.pool, product_id).await?;
        Ok(removed)
    }

    pub async fn list_for_product(&self, product_id: i64) -> CatalogResult<Vec<FacetGroup<P>>> {
        self.catalog.require_product(product_id).await?;
        Ok(GroupStore::<P>::list_for_product(&self.catalog.pool, product_id).await?)
    }

    pub async fn prune_by_attribute(&self, product_id: i64, attribute_id: i64) -> CatalogResult<Vec<i64>> {
        let catalog = self.catalog;
        let _guard = catalog.locks.lock(product_id).await;
        let mut tx = catalog.pool.begin().await?;
        let pruned = prune_by_attribute_in::<P>(&mut tx, product_id, attribute_id).await?;
        tx.commit().await?;
        Ok(pruned)
    }
}
