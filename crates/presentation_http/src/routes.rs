//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Stops
        .route("/api/stops/search", get(handlers::stops::search))
        .route("/api/stops/suggest", get(handlers::stops::suggest))
        .route("/api/stops/nearby", get(handlers::stops::nearby))
        .route("/api/stops/resolve", get(handlers::stops::resolve))
        // Trips
        .route("/api/trips", get(handlers::trips::search_trips))
        // Contact relay
        .route(
            "/api/contact",
            post(handlers::contact::submit).fallback(handlers::contact::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        // Attach state
        .with_state(state)
}
