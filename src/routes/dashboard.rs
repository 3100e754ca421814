//! Dashboard routes: synthetic overview metrics.

use axum::Json;

use crate::errors::ApiResponse;
use crate::models::metric::DashboardMetric;
use crate::services::metrics::MetricsGenerator;

/// GET /api/dashboard/revenue: total revenue card.
pub async fn revenue() -> Json<ApiResponse<DashboardMetric>> {
    let card = MetricsGenerator::from_thread_rng().revenue();
    ApiResponse::success("Revenue data retrieved successfully", card)
}

/// GET /api/dashboard/metrics: the four overview cards.
pub async fn metrics() -> Json<ApiResponse<Vec<DashboardMetric>>> {
    let cards = MetricsGenerator::from_thread_rng().overview();
    ApiResponse::success("Dashboard metrics retrieved successfully", cards)
}
