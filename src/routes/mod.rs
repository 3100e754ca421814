//! Route definitions and router assembly.

pub mod activities;
pub mod dashboard;
pub mod diagnostics;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{Method, Uri},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;

use crate::errors::AppError;
use crate::middleware::{cors, errors, logging};
use crate::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full application router with its edge layers.
pub fn router(state: AppState) -> Router {
    let environment = state.config.environment;
    let cors = cors::cors_layer(&state.config);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/test/cors",
            get(diagnostics::cors_probe).post(diagnostics::cors_echo),
        )
        .route("/api/test/db-connection", get(diagnostics::db_connection))
        .route("/api/dashboard/revenue", get(dashboard::revenue))
        .route("/api/dashboard/metrics", get(dashboard::metrics))
        .route("/api/activities", post(activities::create))
        .route("/api/activities/admin", get(activities::list_admin))
        .route(
            "/api/activities/restaurant/{restaurant_id}",
            get(activities::list_restaurant),
        )
        .route("/api/activities/stats", get(activities::stats))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(logging::trace_layer())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(from_fn_with_state(environment, errors::expose_error_details))
                .layer(CatchPanicLayer::custom(errors::handle_panic))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}

/// Fallback for unmatched routes.
async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Route {method} {} not found", uri.path()))
}
