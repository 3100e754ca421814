//! Activity feed service: role-scoped pagination, creation, and per-type stats.

use chrono::Utc;
use uuid::Uuid;

use crate::db::ActivityStore;
use crate::errors::AppError;
use crate::models::activity::{
    ActivityFeed, ActivityFilter, ActivityStat, CreateActivity, NewActivity, StatsQuery,
    TargetRole,
};
use crate::models::pagination::Pagination;

/// Activities addressed to admins, newest first.
pub async fn list_for_admin(
    store: &dyn ActivityStore,
    pagination: &Pagination,
) -> Result<ActivityFeed, AppError> {
    list(store, &ActivityFilter::admin(), pagination).await
}

/// Activities addressed to the owner of one restaurant, newest first.
pub async fn list_for_restaurant(
    store: &dyn ActivityStore,
    restaurant_id: &str,
    pagination: &Pagination,
) -> Result<ActivityFeed, AppError> {
    let restaurant_id = parse_id("restaurantId", restaurant_id)?;
    list(store, &ActivityFilter::restaurant(restaurant_id), pagination).await
}

async fn list(
    store: &dyn ActivityStore,
    filter: &ActivityFilter,
    pagination: &Pagination,
) -> Result<ActivityFeed, AppError> {
    if !store.is_open() {
        return Err(AppError::Unavailable("store handle is closed".to_string()));
    }

    let activities = store
        .find(filter, pagination.limit(), pagination.offset())
        .await?;
    let total = store.count(filter).await?;

    Ok(ActivityFeed::new(activities, total, pagination))
}

/// Validate and persist a new activity, returning its id.
pub async fn create(store: &dyn ActivityStore, input: CreateActivity) -> Result<Uuid, AppError> {
    let activity = validate(input)?;
    let created = store.insert(activity).await?;

    tracing::info!(
        activity_id = %created.id,
        kind = %created.kind,
        target_role = %created.target_role,
        "Activity created"
    );
    Ok(created.id)
}

/// Group matching activities by type, most frequent first.
pub async fn stats(
    store: &dyn ActivityStore,
    query: &StatsQuery,
) -> Result<Vec<ActivityStat>, AppError> {
    let target_role = match non_blank(query.target_role.as_deref()) {
        Some(value) => Some(parse_role(value)?),
        None => None,
    };
    let restaurant_id = match non_blank(query.restaurant_id.as_deref()) {
        Some(value) => Some(parse_id("restaurantId", value)?),
        None => None,
    };

    let filter = ActivityFilter {
        target_role,
        restaurant_id,
    };
    Ok(store.stats(&filter).await?)
}

/// Check the required fields and normalize the rest.
///
/// Every missing required field is named in the error.
pub fn validate(input: CreateActivity) -> Result<NewActivity, AppError> {
    let kind = non_blank(input.kind.as_deref());
    let title = non_blank(input.title.as_deref());
    let description = non_blank(input.description.as_deref());
    let target_role = non_blank(input.target_role.as_deref());

    let missing: Vec<&str> = [
        ("type", kind.is_none()),
        ("title", title.is_none()),
        ("description", description.is_none()),
        ("targetRole", target_role.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    let (Some(kind), Some(title), Some(description), Some(target_role)) =
        (kind, title, description, target_role)
    else {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    };

    let target_role = parse_role(target_role)?;
    let user_id = non_blank(input.user_id.as_deref())
        .map(|id| parse_id("userId", id))
        .transpose()?;
    let restaurant_id = non_blank(input.restaurant_id.as_deref())
        .map(|id| parse_id("restaurantId", id))
        .transpose()?;

    Ok(NewActivity {
        kind: kind.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        user_id,
        restaurant_id,
        target_role,
        metadata: input.metadata.unwrap_or_default(),
        timestamp: Utc::now(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_role(value: &str) -> Result<TargetRole, AppError> {
    TargetRole::parse(value).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid targetRole '{value}': expected one of admin, restaurant_owner"
        ))
    })
}

fn parse_id(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::Validation(format!("Invalid {field} '{value}'")))
}
