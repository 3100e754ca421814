//! Activity feed routes: role-scoped lists, creation, and per-type stats.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::extract::{AppQuery, Payload};
use crate::models::activity::{
    ActivityFeed, ActivityStats, CreateActivity, CreatedActivity, StatsQuery,
};
use crate::models::pagination::Pagination;
use crate::services::activity as activity_service;
use crate::AppState;

/// GET /api/activities/admin: admin feed, newest first.
pub async fn list_admin(
    State(state): State<AppState>,
    AppQuery(pagination): AppQuery<Pagination>,
) -> Result<Response, AppError> {
    let result = activity_service::list_for_admin(state.store.as_ref(), &pagination).await;
    feed_response(result, &pagination, "Admin activities retrieved successfully")
}

/// GET /api/activities/restaurant/{restaurant_id}: one restaurant owner's feed.
pub async fn list_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    AppQuery(pagination): AppQuery<Pagination>,
) -> Result<Response, AppError> {
    let result =
        activity_service::list_for_restaurant(state.store.as_ref(), &restaurant_id, &pagination)
            .await;
    feed_response(
        result,
        &pagination,
        "Restaurant activities retrieved successfully",
    )
}

/// POST /api/activities: record a new activity.
pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<CreateActivity>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedActivity>>), AppError> {
    let activity_id = activity_service::create(state.store.as_ref(), body).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(
            "Activity created successfully",
            CreatedActivity { activity_id },
        ),
    ))
}

/// GET /api/activities/stats: counts and latest timestamp per activity type.
pub async fn stats(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StatsQuery>,
) -> Result<Json<ApiResponse<ActivityStats>>, AppError> {
    let stats = activity_service::stats(state.store.as_ref(), &query).await?;
    Ok(ApiResponse::success(
        "Activity statistics retrieved successfully",
        ActivityStats { stats },
    ))
}

/// An unreachable store degrades to 503 with an empty page so clients can
/// render an empty state.
fn feed_response(
    result: Result<ActivityFeed, AppError>,
    pagination: &Pagination,
    message: &str,
) -> Result<Response, AppError> {
    match result {
        Ok(feed) => Ok(ApiResponse::success(message, feed).into_response()),
        Err(err) if err.is_unavailable() => {
            tracing::warn!(error = %err, "Serving empty activity feed");
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                ApiResponse::degraded(
                    "Database connection not available",
                    ActivityFeed::empty(pagination),
                ),
            )
                .into_response())
        }
        Err(err) => Err(err),
    }
}
