//! Product API module
//!
//! Product records plus everything scoped to one product: attribute
//! bindings, the three facet group stores, media sync, the facet
//! overwrite and stock.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        // Bindings
        .route(
            "/{id}/attributes",
            get(handler::list_bindings).post(handler::attach_attribute),
        )
        .route(
            "/{id}/attributes/{attribute_id}",
            put(handler::update_roles).delete(handler::detach_attribute),
        )
        // Facet groups (POST = find-or-create, PUT = bulk replace)
        .route(
            "/{id}/price-groups",
            get(handler::list_price_groups)
                .post(handler::upsert_price_group)
                .put(handler::replace_price_groups),
        )
        .route(
            "/{id}/weight-groups",
            get(handler::list_weight_groups)
                .post(handler::upsert_weight_group)
                .put(handler::replace_weight_groups),
        )
        .route("/{id}/media-groups", get(handler::list_media_groups))
        .route(
            "/{id}/media",
            get(handler::list_media).put(handler::sync_media),
        )
        .route("/{id}/facets", put(handler::replace_facets))
        .route("/{id}/price-summary", get(handler::price_summary))
        // Stock
        .route("/{id}/stock", get(handler::list_stock))
        .route("/{id}/stock/reconcile", post(handler::reconcile_stock))
}
