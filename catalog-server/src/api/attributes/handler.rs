//! Attribute API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{AttributeCreate, AttributeFull, AttributeValue, AttributeValueActive};

use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/attributes - create an attribute with its values
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AttributeCreate>,
) -> AppResult<Json<AttributeFull>> {
    let attr = state.catalog.create_attribute(payload).await?;
    Ok(Json(attr))
}

/// GET /api/attributes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AttributeFull>> {
    let attr = state.catalog.find_attribute(id).await?;
    Ok(Json(attr))
}

/// PUT /api/attributes/values/:id/active - toggle a value (no reconcile)
pub async fn set_value_active(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AttributeValueActive>,
) -> AppResult<Json<AttributeValue>> {
    let value = state.catalog.set_value_active(id, payload.is_active).await?;
    Ok(Json(value))
}
