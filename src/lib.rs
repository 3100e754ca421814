pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use db::ActivityStore;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn ActivityStore>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ActivityStore>, config: config::AppConfig) -> Self {
        Self { store, config }
    }
}
