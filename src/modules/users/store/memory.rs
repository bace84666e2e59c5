use std::collections::HashMap;

use async_trait::async_trait;
use bastion_core::RawError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserStore;
use crate::modules::users::model::{NewUser, User, UserWithPassword};

/// In-memory user store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, UserWithPassword>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, RawError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RawError> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|u| u.user.clone()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RawError> {
        // Check and insert under one write lock so concurrent registrations
        // with the same email cannot both succeed.
        let mut users = self.users.write().await;

        if users.values().any(|u| u.user.email == new_user.email) {
            return Err(RawError::duplicate_key("email", new_user.email));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };

        users.insert(
            user.id,
            UserWithPassword {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );

        Ok(user)
    }
}
