//! Stock API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Stock, StockUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// PUT /api/stock/:id - set quantity / reserved / low-stock threshold
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockUpdate>,
) -> AppResult<Json<Stock>> {
    let row = state.catalog.update_stock(id, payload).await?;
    Ok(Json(row))
}
