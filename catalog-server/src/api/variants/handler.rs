//! Variant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{CheckoutQuote, VariantResolution};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/variants/:id/resolve - price, weight and media group of a variant
pub async fn resolve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<VariantResolution>> {
    let resolution = state.catalog.resolve_variant(id).await?;
    Ok(Json(resolution))
}

/// GET /api/variants/:id/checkout - fails when price or weight is not configured
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CheckoutQuote>> {
    let quote = state.catalog.checkout(id).await?;
    Ok(Json(quote))
}
