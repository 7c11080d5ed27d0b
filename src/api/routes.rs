//! API route definitions

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::handler::ItemHandler;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub handler: ItemHandler,
}

impl AppState {
    pub fn new(handler: ItemHandler) -> Self {
        Self { handler }
    }
}

/// Create the API router
///
/// Unknown paths and unsupported methods on known paths are still handed to
/// the item handler, which answers them with its unsupported-route error.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Items
        .route(
            "/items",
            get(handlers::list_items)
                .put(handlers::put_item)
                .fallback(handlers::unmatched),
        )
        .route(
            "/items/{id}",
            get(handlers::get_item)
                .delete(handlers::delete_item)
                .fallback(handlers::unmatched),
        )

        // Health
        .route("/health", get(handlers::health))

        .fallback(handlers::unmatched)

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
