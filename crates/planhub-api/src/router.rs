//! Route definitions for the PlanHub action history API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(history_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Action history endpoints.
fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/action-history", get(handlers::history::list_actions))
        .route("/action-history", post(handlers::history::record_action))
        .route("/action-history", delete(handlers::history::clear_actions))
        .route("/action-history/{id}", get(handlers::history::get_action))
        .route(
            "/action-history/{id}/undo",
            post(handlers::history::undo_action),
        )
        .route(
            "/action-history/{id}/redo",
            post(handlers::history::redo_action),
        )
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
