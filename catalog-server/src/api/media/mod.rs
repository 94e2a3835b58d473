//! Media API module
//!
//! Registers already-uploaded objects; linking happens through
//! `PUT /api/products/{id}/media`.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/media", post(handler::register))
}
