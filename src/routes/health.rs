//! Health check endpoint.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Environment;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub environment: Environment,
}

/// GET /health: liveness; does not touch the store.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        success: true,
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
        environment: state.config.environment,
    })
}
