//! Media API Handlers

use axum::{Json, extract::State};
use shared::models::{Media, MediaCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/media - register an uploaded object (unattached)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<MediaCreate>,
) -> AppResult<Json<Media>> {
    let media = state.catalog.register_media(payload).await?;
    Ok(Json(media))
}
