use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreResult, UserStore};
use crate::models::exercise::Exercise;
use crate::models::user::{User, UserSummary};

/// In-process store for single-instance runs and tests.
/// Users are kept in creation order; each append holds the write lock, which
/// makes it atomic per user document.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, username: &str) -> StoreResult<UserSummary> {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            log: Vec::new(),
        };
        let summary = UserSummary::from(&user);
        self.users.write().await.push(user);
        Ok(summary)
    }

    async fn list_users(&self) -> StoreResult<Vec<UserSummary>> {
        let users = self.users.read().await;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    async fn append_exercise(&self, id: Uuid, exercise: &Exercise) -> StoreResult<Option<UserSummary>> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.log.push(exercise.clone());
            UserSummary::from(&*user)
        }))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
