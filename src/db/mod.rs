//! Storage adapter: one collection of user documents, each embedding its log.
//!
//! Handlers only see [`UserStore`]. [`connect`] picks the backend from the
//! database URL: PostgreSQL for real deployments, memory for `memory://`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::models::exercise::Exercise;
use crate::models::user::{User, UserSummary};

pub mod memory;
pub mod pool;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a user with an empty log and returns it with its new id.
    async fn create_user(&self, username: &str) -> StoreResult<UserSummary>;

    /// All users in creation order.
    async fn list_users(&self) -> StoreResult<Vec<UserSummary>>;

    /// Appends to the user's log in a single atomic update. `None` when no
    /// user has this id.
    async fn append_exercise(&self, id: Uuid, exercise: &Exercise) -> StoreResult<Option<UserSummary>>;

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Cheap round-trip used by readiness checks.
    async fn ping(&self) -> StoreResult<()>;

    async fn close(&self);
}

pub async fn connect(config: &Config) -> StoreResult<Arc<dyn UserStore>> {
    if config.uses_memory_store() {
        tracing::warn!("Using in-memory store, data is lost on shutdown");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let pool = pool::create_pool(&config.database_url, config.database_max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgUserStore::new(pool)))
}
