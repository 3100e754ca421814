//! Postgres-backed activity store.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ActivityStore, ConnectionInfo, ConnectionState, StoreError};
use crate::models::activity::{Activity, ActivityFilter, ActivityStat, NewActivity};

#[derive(Debug, Clone)]
pub struct PgActivityStore {
    pool: PgPool,
}

impl PgActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// WHERE clause for a filter, with `$n` placeholders in bind order:
/// target role first, then restaurant id.
fn where_clause(filter: &ActivityFilter) -> String {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_index = 0u32;

    if filter.target_role.is_some() {
        param_index += 1;
        conditions.push(format!("target_role = ${param_index}"));
    }
    if filter.restaurant_id.is_some() {
        param_index += 1;
        conditions.push(format!("restaurant_id = ${param_index}"));
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Bind filter values in the order `where_clause` numbers them.
macro_rules! bind_filter {
    ($query:ident, $filter:expr) => {
        if let Some(role) = $filter.target_role {
            $query = $query.bind(role);
        }
        if let Some(restaurant) = $filter.restaurant_id {
            $query = $query.bind(restaurant);
        }
    };
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn insert(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let row = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (id, activity_type, title, description, user_id,
                restaurant_id, target_role, metadata, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&activity.kind)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(activity.user_id)
        .bind(activity.restaurant_id)
        .bind(activity.target_role)
        .bind(Json(&activity.metadata))
        .bind(activity.timestamp)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find(
        &self,
        filter: &ActivityFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>, StoreError> {
        let sql = format!(
            "SELECT * FROM activities {} ORDER BY timestamp DESC, id DESC LIMIT {limit} OFFSET {offset}",
            where_clause(filter)
        );

        let mut query = sqlx::query_as::<_, Activity>(&sql);
        bind_filter!(query, filter);

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn count(&self, filter: &ActivityFilter) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM activities {}", where_clause(filter));

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        bind_filter!(query, filter);

        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn stats(&self, filter: &ActivityFilter) -> Result<Vec<ActivityStat>, StoreError> {
        let sql = format!(
            r#"
            SELECT activity_type, COUNT(*) AS count, MAX(timestamp) AS latest_timestamp
            FROM activities
            {}
            GROUP BY activity_type
            ORDER BY count DESC, latest_timestamp DESC, activity_type ASC
            "#,
            where_clause(filter)
        );

        let mut query = sqlx::query_as::<_, ActivityStat>(&sql);
        bind_filter!(query, filter);

        Ok(query.fetch_all(&self.pool).await?)
    }

    fn is_open(&self) -> bool {
        !self.pool.is_closed()
    }

    async fn connection_info(&self) -> ConnectionInfo {
        let options = self.pool.connect_options();
        let state = if self.pool.is_closed() {
            ConnectionState::Disconnected
        } else {
            match sqlx::query("SELECT 1").execute(&self.pool).await {
                Ok(_) => ConnectionState::Connected,
                Err(e) => {
                    tracing::warn!(error = %e, "Database connectivity probe failed");
                    ConnectionState::Disconnected
                }
            }
        };

        ConnectionInfo {
            state,
            host: Some(options.get_host().to_string()),
            port: Some(options.get_port()),
            name: options.get_database().map(str::to_string),
        }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_clause_without_filter() {
        assert_eq!(where_clause(&ActivityFilter::default()), "");
    }

    #[test]
    fn where_clause_numbers_placeholders_in_bind_order() {
        assert_eq!(
            where_clause(&ActivityFilter::admin()),
            "WHERE target_role = $1"
        );
        assert_eq!(
            where_clause(&ActivityFilter::restaurant(Uuid::nil())),
            "WHERE target_role = $1 AND restaurant_id = $2"
        );
        let only_restaurant = ActivityFilter {
            target_role: None,
            restaurant_id: Some(Uuid::nil()),
        };
        assert_eq!(where_clause(&only_restaurant), "WHERE restaurant_id = $1");
    }
}
