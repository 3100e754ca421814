//! Activity log model: events surfaced to admins or restaurant owners.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::pagination::{PageInfo, Pagination};

/// Open-ended structured context attached to an activity.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Audience an activity is directed at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "target_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    Admin,
    RestaurantOwner,
}

impl TargetRole {
    pub const ALL: [TargetRole; 2] = [TargetRole::Admin, TargetRole::RestaurantOwner];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::RestaurantOwner => "restaurant_owner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "activity_type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub user_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
    pub target_role: TargetRole,
    #[sqlx(json)]
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw create request as it arrives over HTTP (JSON or form encoded).
///
/// Every field is optional here so that missing values can be reported
/// together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub restaurant_id: Option<String>,
    pub target_role: Option<String>,
    pub metadata: Option<Metadata>,
}

/// A validated activity ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub kind: String,
    pub title: String,
    pub description: String,
    pub user_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
    pub target_role: TargetRole,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
}

impl NewActivity {
    /// Materialize the stored record with a fresh time-ordered id.
    pub fn into_activity(self) -> Activity {
        let now = Utc::now();
        Activity {
            id: Uuid::now_v7(),
            kind: self.kind,
            title: self.title,
            description: self.description,
            user_id: self.user_id,
            restaurant_id: self.restaurant_id,
            target_role: self.target_role,
            metadata: self.metadata,
            timestamp: self.timestamp,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Which activities a query surfaces. Absent fields do not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub target_role: Option<TargetRole>,
    pub restaurant_id: Option<Uuid>,
}

impl ActivityFilter {
    pub fn admin() -> Self {
        Self {
            target_role: Some(TargetRole::Admin),
            restaurant_id: None,
        }
    }

    pub fn restaurant(restaurant_id: Uuid) -> Self {
        Self {
            target_role: Some(TargetRole::RestaurantOwner),
            restaurant_id: Some(restaurant_id),
        }
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        self.target_role
            .map_or(true, |role| activity.target_role == role)
            && self
                .restaurant_id
                .map_or(true, |id| activity.restaurant_id == Some(id))
    }
}

/// Per-type aggregate over a filtered set of activities.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStat {
    #[serde(rename = "type")]
    #[sqlx(rename = "activity_type")]
    pub kind: String,
    pub count: i64,
    pub latest_timestamp: DateTime<Utc>,
}

/// Stats query string: `?targetRole=&restaurantId=`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub target_role: Option<String>,
    pub restaurant_id: Option<String>,
}

/// One page of activities plus pagination details.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeed {
    pub activities: Vec<Activity>,
    pub pagination: PageInfo,
}

impl ActivityFeed {
    pub fn new(activities: Vec<Activity>, total: i64, pagination: &Pagination) -> Self {
        Self {
            activities,
            pagination: PageInfo::new(total, pagination),
        }
    }

    /// Well-formed empty page for degraded responses.
    pub fn empty(pagination: &Pagination) -> Self {
        Self::new(Vec::new(), 0, pagination)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedActivity {
    pub activity_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityStats {
    pub stats: Vec<ActivityStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(role: TargetRole, restaurant_id: Option<Uuid>) -> Activity {
        NewActivity {
            kind: "order".to_string(),
            title: "New order".to_string(),
            description: "Order #123 placed".to_string(),
            user_id: None,
            restaurant_id,
            target_role: role,
            metadata: Metadata::new(),
            timestamp: Utc::now(),
        }
        .into_activity()
    }

    #[test]
    fn target_role_serialization() {
        let json = serde_json::to_string(&TargetRole::RestaurantOwner).unwrap();
        assert_eq!(json, "\"restaurant_owner\"");
        assert_eq!(TargetRole::parse("admin"), Some(TargetRole::Admin));
        assert_eq!(TargetRole::parse("customer"), None);
    }

    #[test]
    fn activity_serializes_camel_case() {
        let activity = sample(TargetRole::Admin, None);
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "order");
        assert_eq!(json["targetRole"], "admin");
        assert!(json["userId"].is_null());
        assert!(json["metadata"].as_object().unwrap().is_empty());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn create_activity_accepts_partial_body() {
        let body: CreateActivity =
            serde_json::from_str(r#"{"type":"order","targetRole":"admin"}"#).unwrap();
        assert_eq!(body.kind.as_deref(), Some("order"));
        assert_eq!(body.target_role.as_deref(), Some("admin"));
        assert!(body.title.is_none());
    }

    #[test]
    fn create_activity_rejects_non_object_metadata() {
        let result = serde_json::from_str::<CreateActivity>(r#"{"metadata":[1,2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn filter_matching() {
        let restaurant = Uuid::new_v4();
        let owner = sample(TargetRole::RestaurantOwner, Some(restaurant));
        let admin = sample(TargetRole::Admin, Some(restaurant));

        assert!(ActivityFilter::default().matches(&owner));
        assert!(ActivityFilter::admin().matches(&admin));
        assert!(!ActivityFilter::admin().matches(&owner));
        assert!(ActivityFilter::restaurant(restaurant).matches(&owner));
        assert!(!ActivityFilter::restaurant(Uuid::new_v4()).matches(&owner));
        assert!(!ActivityFilter::restaurant(restaurant).matches(&admin));
    }

    #[test]
    fn stat_serializes_type_key() {
        let stat = ActivityStat {
            kind: "payment".to_string(),
            count: 3,
            latest_timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["type"], "payment");
        assert_eq!(json["count"], 3);
        assert!(json["latestTimestamp"].is_string());
    }
}
