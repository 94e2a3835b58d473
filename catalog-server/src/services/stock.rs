//! Stock reconciler
//!
//! Keeps one variant (and one stock row) per combination of the Cartesian
//! product of every bound attribute's active values. Stock is keyed by the
//! full combination regardless of facet roles. The simple stock row
//! (`variant_id IS NULL`) is never touched here.

use shared::models::{ReconcileReport, Stock, StockUpdate};
use sqlx::SqliteConnection;
use std::collections::{HashMap, HashSet};

use super::catalog::CatalogService;
use super::error::{CatalogError, CatalogResult, EntityKind};
use crate::db::repository::{attribute, binding, stock, variant};
use crate::grouping::variant_matrix;
use crate::utils::validation::validate_stock_update;

/// Diff the stored variants against the current matrix and apply it
pub(crate) async fn reconcile_in(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> CatalogResult<ReconcileReport> {
    let bindings = binding::find_by_product(&mut *conn, product_id).await?;
    let attribute_ids: Vec<i64> = bindings.iter().map(|b| b.attribute_id).collect();

    let mut axes: HashMap<i64, Vec<i64>> =
        attribute_ids.iter().map(|&id| (id, Vec::new())).collect();
    for value in attribute::find_active_values(&mut *conn, &attribute_ids).await? {
        axes.entry(value.attribute_id).or_default().push(value.id);
    }
    let axes: Vec<(i64, Vec<i64>)> = axes.into_iter().collect();
    let matrix = variant_matrix(&axes);

    let existing = variant::find_by_product(&mut *conn, product_id).await?;
    let target: HashSet<String> = matrix.iter().map(|k| k.to_string()).collect();
    let current: HashSet<String> = existing.iter().map(|v| v.combination.to_string()).collect();

    let stale: Vec<i64> = existing
        .iter()
        .filter(|v| !target.contains(&v.combination.to_string()))
        .map(|v| v.id)
        .collect();
    let deleted = variant::delete_by_ids(&mut *conn, &stale).await? as usize;

    let mut created = 0;
    for key in matrix.iter().filter(|k| !current.contains(&k.to_string())) {
        let created_variant = variant::insert(&mut *conn, product_id, key).await?;
        stock::insert_for_variant(&mut *conn, product_id, created_variant.id, &key.to_string())
            .await?;
        created += 1;
    }

    let report = ReconcileReport {
        created,
        deleted,
        kept: existing.len() - stale.len(),
    };
    tracing::info!(
        product_id,
        attributes = attribute_ids.len(),
        created = report.created,
        deleted = report.deleted,
        kept = report.kept,
        "Stock reconciled"
    );
    Ok(report)
}

impl CatalogService {
    /// Re-run the stock matrix for a product (e.g. after toggling values)
    pub async fn reconcile(&self, product_id: i64) -> CatalogResult<ReconcileReport> {
        self.require_product(product_id).await?;
        let _guard = self.locks.lock(product_id).await;
        let mut tx = self.pool.begin().await?;
        let report = reconcile_in(&mut tx, product_id).await?;
        tx.commit().await?;
        Ok(report)
    }

    pub async fn list_stock(&self, product_id: i64) -> CatalogResult<Vec<Stock>> {
        self.require_product(product_id).await?;
        Ok(stock::find_by_product(&self.pool, product_id).await?)
    }

    pub async fn update_stock(&self, stock_id: i64, update: StockUpdate) -> CatalogResult<Stock> {
        let row = stock::find_by_id(&self.pool, stock_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Stock, stock_id))?;

        let _guard = self.locks.lock(row.product_id).await;
        // re-read under the lock
        let row = stock::find_by_id(&self.pool, stock_id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Stock, stock_id))?;
        validate_stock_update(row.quantity, row.reserved_quantity, &update)?;

        let updated = stock::update(&self.pool, stock_id, &update).await?;
        tracing::info!(
            stock_id,
            product_id = updated.product_id,
            quantity = updated.quantity,
            reserved = updated.reserved_quantity,
            "Stock updated"
        );
        Ok(updated)
    }
}
