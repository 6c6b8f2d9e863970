use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use pwhash_protocol::endpoints;

use crate::handler::{self, AppState};

/// Build the axum router with all pwhash endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HASH, post(handler::submit_handler))
        .route(endpoints::HASH_BY_KEY, get(handler::lookup_handler))
        .route(endpoints::STATS, get(handler::stats_handler))
        .route(endpoints::SHUTDOWN, put(handler::shutdown_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
