use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{StoreResult, UserStore};
use crate::models::exercise::Exercise;
use crate::models::user::{User, UserSummary};

/// Users live in one table; the log is a `JSONB` array on the user's row so
/// an append touches a single row.
pub struct PgUserStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    log: Json<Vec<Exercise>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            log: row.log.0,
        }
    }
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, username: &str) -> StoreResult<UserSummary> {
        let user = sqlx::query_as::<_, UserSummary>(
            r#"
            INSERT INTO users (id, username)
            VALUES ($1, $2)
            RETURNING username, id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT username, id FROM users ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn append_exercise(&self, id: Uuid, exercise: &Exercise) -> StoreResult<Option<UserSummary>> {
        let user = sqlx::query_as::<_, UserSummary>(
            r#"
            UPDATE users SET log = log || jsonb_build_array($2::jsonb)
            WHERE id = $1
            RETURNING username, id
            "#,
        )
        .bind(id)
        .bind(Json(exercise))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, log FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
