//! Activity storage: the store trait, its Postgres and in-memory backends,
//! and connection pool utilities.

pub mod memory;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::models::activity::{Activity, ActivityFilter, ActivityStat, NewActivity};

pub use memory::MemoryActivityStore;
pub use postgres::PgActivityStore;

/// Errors raised by an activity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store cannot be reached: closed handle, pool timeout or I/O failure.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            other => Self::Database(other),
        }
    }
}

/// Connectivity of the store handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    /// Numeric ready-state code reported by the diagnostics endpoint.
    pub fn ready_state(self) -> u8 {
        match self {
            Self::Disconnected => 0,
            Self::Connected => 1,
        }
    }
}

/// Snapshot of the store connection for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub state: ConnectionState,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
}

/// Append-mostly store of activity records.
///
/// Reads are ordered newest first; ties on `timestamp` are broken by id,
/// newest first.
#[async_trait]
pub trait ActivityStore: Send + Sync + std::fmt::Debug {
    /// Persist a validated activity.
    async fn insert(&self, activity: NewActivity) -> Result<Activity, StoreError>;

    /// Fetch one page of matching activities.
    async fn find(
        &self,
        filter: &ActivityFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>, StoreError>;

    /// Count matching activities.
    async fn count(&self, filter: &ActivityFilter) -> Result<i64, StoreError>;

    /// Group matching activities by type, most frequent first.
    async fn stats(&self, filter: &ActivityFilter) -> Result<Vec<ActivityStat>, StoreError>;

    /// Whether the handle is still open. Does not touch the network.
    fn is_open(&self) -> bool;

    /// Probe connectivity.
    async fn connection_info(&self) -> ConnectionInfo;

    /// Release the handle. Later operations fail with `Unavailable`.
    async fn close(&self);
}

/// Create a PostgreSQL connection pool.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply pending schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Open the store selected by configuration: Postgres when `DATABASE_URL`
/// is set, the in-memory store otherwise.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn ActivityStore>, StoreError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, activities are kept in memory only");
        return Ok(Arc::new(MemoryActivityStore::new()));
    };

    let pool = create_pool(
        url,
        config.database_max_connections,
        config.database_connect_timeout,
    )
    .await?;
    migrate(&pool).await?;

    let store = PgActivityStore::new(pool);
    let info = store.connection_info().await;
    tracing::info!(
        host = info.host.as_deref().unwrap_or("-"),
        database = info.name.as_deref().unwrap_or("-"),
        "Connected to activity database"
    );
    Ok(Arc::new(store))
}
