//! Variant API module
//!
//! Read path used by storefront and cart consumers.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/variants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/resolve", get(handler::resolve))
        .route("/{id}/checkout", get(handler::checkout))
}
