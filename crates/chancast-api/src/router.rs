//! Route definitions for the ChannelCast HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/events", get(handlers::events::events))
        .route("/reactions", post(handlers::message::react))
        .route("/health", get(handlers::health::health))
        .merge(admin_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Privileged endpoints; each handler checks its required privilege.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/new", post(handlers::message::create))
        .route("/admin/edit-message", post(handlers::message::edit))
        .route(
            "/admin/delete-message/{id}",
            post(handlers::message::delete),
        )
        .route(
            "/admin/scheduled",
            get(handlers::scheduled::list).post(handlers::scheduled::replace),
        )
        .route("/admin/statistics", get(handlers::statistics::statistics))
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;
    if origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
