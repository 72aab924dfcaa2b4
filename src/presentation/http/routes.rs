//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{middleware, response::IntoResponse, routing::get, Router};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/invites", invite_routes())
        .nest("/ratings", rating_routes())
        .nest("/hooks", hook_routes())
}

fn invite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::invite::list_invites).post(handlers::invite::create_invite),
        )
        .route(
            "/{invite_id}",
            get(handlers::invite::get_invite)
                .put(handlers::invite::replace_invite)
                .patch(handlers::invite::patch_invite)
                .delete(handlers::invite::delete_invite),
        )
}

fn rating_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::rating::list_ratings).post(handlers::rating::create_rating),
        )
        .route(
            "/{rating_id}",
            get(handlers::rating::get_rating)
                .put(handlers::rating::replace_rating)
                .patch(handlers::rating::patch_rating)
                .delete(handlers::rating::delete_rating),
        )
}

fn hook_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::hook::list_hooks).post(handlers::hook::create_hook),
        )
        .route(
            "/{hook_id}",
            get(handlers::hook::get_hook)
                .put(handlers::hook::update_hook)
                .delete(handlers::hook::delete_hook),
        )
}
