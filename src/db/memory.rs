//! In-process activity store, used when no database is configured and in tests.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ActivityStore, ConnectionInfo, ConnectionState, StoreError};
use crate::models::activity::{Activity, ActivityFilter, ActivityStat, NewActivity};

#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    activities: RwLock<Vec<Activity>>,
    closed: AtomicBool,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("store is closed".to_string()))
        }
    }
}

fn newest_first(a: &Activity, b: &Activity) -> Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn insert(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        self.ensure_open()?;
        let activity = activity.into_activity();
        self.activities.write().await.push(activity.clone());
        Ok(activity)
    }

    async fn find(
        &self,
        filter: &ActivityFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>, StoreError> {
        self.ensure_open()?;
        let activities = self.activities.read().await;
        let mut matching: Vec<&Activity> = activities.iter().filter(|a| filter.matches(a)).collect();
        matching.sort_by(|a, b| newest_first(a, b));

        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, filter: &ActivityFilter) -> Result<i64, StoreError> {
        self.ensure_open()?;
        let activities = self.activities.read().await;
        let count = activities.iter().filter(|a| filter.matches(a)).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn stats(&self, filter: &ActivityFilter) -> Result<Vec<ActivityStat>, StoreError> {
        self.ensure_open()?;
        let activities = self.activities.read().await;

        let mut groups: HashMap<&str, ActivityStat> = HashMap::new();
        for activity in activities.iter().filter(|a| filter.matches(a)) {
            groups
                .entry(activity.kind.as_str())
                .and_modify(|stat| {
                    stat.count += 1;
                    stat.latest_timestamp = stat.latest_timestamp.max(activity.timestamp);
                })
                .or_insert_with(|| ActivityStat {
                    kind: activity.kind.clone(),
                    count: 1,
                    latest_timestamp: activity.timestamp,
                });
        }

        let mut stats: Vec<ActivityStat> = groups.into_values().collect();
        stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.latest_timestamp.cmp(&a.latest_timestamp))
                .then_with(|| a.kind.cmp(&b.kind))
        });
        Ok(stats)
    }

    fn is_open(&self) -> bool {
        !self.closed.load(AtomicOrdering::Acquire)
    }

    async fn connection_info(&self) -> ConnectionInfo {
        let state = if self.is_open() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };
        ConnectionInfo {
            state,
            host: None,
            port: None,
            name: Some("memory".to_string()),
        }
    }

    async fn close(&self) {
        self.closed.store(true, AtomicOrdering::Release);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::activity::{Metadata, TargetRole};

    fn new_activity(kind: &str, role: TargetRole, minutes_ago: i64) -> NewActivity {
        NewActivity {
            kind: kind.to_string(),
            title: format!("{kind} event"),
            description: "something happened".to_string(),
            user_id: None,
            restaurant_id: None,
            target_role: role,
            metadata: Metadata::new(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn find_orders_newest_first_and_pages() {
        let store = MemoryActivityStore::new();
        for minutes in [30, 10, 20, 40] {
            store
                .insert(new_activity("order", TargetRole::Admin, minutes))
                .await
                .unwrap();
        }

        let filter = ActivityFilter::admin();
        let first = store.find(&filter, 2, 0).await.unwrap();
        let second = store.find(&filter, 2, 2).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert!(first[0].timestamp > first[1].timestamp);
        assert!(first[1].timestamp > second[0].timestamp);
        assert!(second[0].timestamp > second[1].timestamp);
        assert!(store.find(&filter, 2, 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn count_respects_filter() {
        let store = MemoryActivityStore::new();
        let restaurant = Uuid::new_v4();
        store
            .insert(new_activity("order", TargetRole::Admin, 1))
            .await
            .unwrap();
        let mut owned = new_activity("order", TargetRole::RestaurantOwner, 2);
        owned.restaurant_id = Some(restaurant);
        store.insert(owned).await.unwrap();

        assert_eq!(store.count(&ActivityFilter::default()).await.unwrap(), 2);
        assert_eq!(store.count(&ActivityFilter::admin()).await.unwrap(), 1);
        assert_eq!(
            store
                .count(&ActivityFilter::restaurant(restaurant))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .count(&ActivityFilter::restaurant(Uuid::new_v4()))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn stats_group_by_type() {
        let store = MemoryActivityStore::new();
        let mut newest_order = None;
        for (kind, minutes) in [("order", 5), ("payment", 3), ("order", 1), ("order", 9)] {
            let activity = store
                .insert(new_activity(kind, TargetRole::Admin, minutes))
                .await
                .unwrap();
            if kind == "order" && minutes == 1 {
                newest_order = Some(activity.timestamp);
            }
        }

        let stats = store.stats(&ActivityFilter::default()).await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].kind, "order");
        assert_eq!(stats[0].count, 3);
        assert_eq!(Some(stats[0].latest_timestamp), newest_order);
        assert_eq!(stats[1].kind, "payment");
        assert_eq!(stats.iter().map(|s| s.count).sum::<i64>(), 4);
    }

    #[tokio::test]
    async fn closed_store_is_unavailable() {
        let store = MemoryActivityStore::new();
        assert_eq!(
            store.connection_info().await.state,
            ConnectionState::Connected
        );

        store.close().await;

        assert!(!store.is_open());
        assert_eq!(
            store.connection_info().await.state,
            ConnectionState::Disconnected
        );
        let err = store.count(&ActivityFilter::admin()).await.unwrap_err();
        assert!(err.is_unavailable());
        let err = store
            .insert(new_activity("order", TargetRole::Admin, 0))
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
