//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    FacetReplace, FacetReplaceReport, FacetRoles, GroupInput, Media, MediaGroup, MediaSyncItem,
    MediaSyncReport, PriceGroup, PricePayload, PriceSummary, Product, ProductAttribute,
    ProductAttributeCreate, ProductCreate, ReconcileReport, Stock, WeightGroup, WeightPayload,
};

use crate::core::ServerState;
use crate::utils::AppResult;

// ── Products ────────────────────────────────────────────────────────

/// POST /api/products - create a product (with its simple stock row)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.create_product(payload).await?;
    Ok(Json(product))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.find_product(id).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - groups, variants and stock cascade; media are unlinked
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    state.catalog.delete_product(id).await?;
    Ok(Json(true))
}

// ── Bindings ────────────────────────────────────────────────────────

/// GET /api/products/:id/attributes
pub async fn list_bindings(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ProductAttribute>>> {
    let bindings = state.catalog.list_bindings(id).await?;
    Ok(Json(bindings))
}

/// POST /api/products/:id/attributes - bind (or re-role) an attribute, reconcile stock
pub async fn attach_attribute(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductAttributeCreate>,
) -> AppResult<Json<ProductAttribute>> {
    let binding = state.catalog.attach_attribute(id, payload).await?;
    Ok(Json(binding))
}

/// PUT /api/products/:id/attributes/:attribute_id - change facet roles
pub async fn update_roles(
    State(state): State<ServerState>,
    Path((id, attribute_id)): Path<(i64, i64)>,
    Json(roles): Json<FacetRoles>,
) -> AppResult<Json<ProductAttribute>> {
    let binding = state.catalog.update_roles(id, attribute_id, roles).await?;
    Ok(Json(binding))
}

/// DELETE /api/products/:id/attributes/:attribute_id
pub async fn detach_attribute(
    State(state): State<ServerState>,
    Path((id, attribute_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.catalog.detach_attribute(id, attribute_id).await?;
    Ok(Json(true))
}

// ── Facet groups ────────────────────────────────────────────────────

/// GET /api/products/:id/price-groups
pub async fn list_price_groups(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<PriceGroup>>> {
    let groups = state.catalog.price_groups().list_for_product(id).await?;
    Ok(Json(groups))
}

/// POST /api/products/:id/price-groups - find-or-create one group
pub async fn upsert_price_group(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GroupInput<PricePayload>>,
) -> AppResult<Json<PriceGroup>> {
    let group = state.catalog.price_groups().find_or_create(id, payload).await?;
    Ok(Json(group))
}

/// PUT /api/products/:id/price-groups - replace every price group
pub async fn replace_price_groups(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<Vec<GroupInput<PricePayload>>>,
) -> AppResult<Json<Vec<PriceGroup>>> {
    let groups = state.catalog.price_groups();
    groups.bulk_create(id, payload).await?;
    Ok(Json(groups.list_for_product(id).await?))
}

/// GET /api/products/:id/weight-groups
pub async fn list_weight_groups(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<WeightGroup>>> {
    let groups = state.catalog.weight_groups().list_for_product(id).await?;
    Ok(Json(groups))
}

/// POST /api/products/:id/weight-groups - find-or-create one group
pub async fn upsert_weight_group(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GroupInput<WeightPayload>>,
) -> AppResult<Json<WeightGroup>> {
    let group = state.catalog.weight_groups().find_or_create(id, payload).await?;
    Ok(Json(group))
}

/// PUT /api/products/:id/weight-groups - replace every weight group
pub async fn replace_weight_groups(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<Vec<GroupInput<WeightPayload>>>,
) -> AppResult<Json<Vec<WeightGroup>>> {
    let groups = state.catalog.weight_groups();
    groups.bulk_create(id, payload).await?;
    Ok(Json(groups.list_for_product(id).await?))
}

/// GET /api/products/:id/media-groups
pub async fn list_media_groups(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MediaGroup>>> {
    let groups = state.catalog.media_groups().list_for_product(id).await?;
    Ok(Json(groups))
}

// ── Media ───────────────────────────────────────────────────────────

/// GET /api/products/:id/media
pub async fn list_media(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Media>>> {
    let media = state.catalog.list_media(id).await?;
    Ok(Json(media))
}

/// PUT /api/products/:id/media - full replace sync keyed by media id
pub async fn sync_media(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<Vec<MediaSyncItem>>,
) -> AppResult<Json<MediaSyncReport>> {
    let report = state.catalog.sync_product_media(id, payload).await?;
    Ok(Json(report))
}

// ── Overwrite / read models ─────────────────────────────────────────

/// PUT /api/products/:id/facets - replace price, weight and media sections at once
pub async fn replace_facets(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FacetReplace>,
) -> AppResult<Json<FacetReplaceReport>> {
    let report = state.catalog.replace_product_facets(id, payload).await?;
    Ok(Json(report))
}

/// GET /api/products/:id/price-summary
pub async fn price_summary(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PriceSummary>> {
    let summary = state.catalog.price_summary(id).await?;
    Ok(Json(summary))
}

// ── Stock ───────────────────────────────────────────────────────────

/// GET /api/products/:id/stock
pub async fn list_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Stock>>> {
    let rows = state.catalog.list_stock(id).await?;
    Ok(Json(rows))
}

/// POST /api/products/:id/stock/reconcile
pub async fn reconcile_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReconcileReport>> {
    let report = state.catalog.reconcile(id).await?;
    Ok(Json(report))
}
