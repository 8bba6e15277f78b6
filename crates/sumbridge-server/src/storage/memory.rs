//! In-memory storage backend
//!
//! Suitable for development and single-instance deployments.
//! Data is lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{StorageError, User, UserStore};

/// In-memory user store
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn any_user<F>(&self, predicate: F) -> bool
    where
        F: Fn(&User) -> bool,
    {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.values().any(predicate)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.values().find(|u| u.api_key == api_key).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StorageError> {
        Ok(self.any_user(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StorageError> {
        Ok(self.any_user(|u| u.email == email))
    }

    async fn exists_by_institution_id(&self, institution_id: &str) -> Result<bool, StorageError> {
        Ok(self.any_user(|u| u.institution_id == institution_id))
    }

    async fn save(&self, mut user: User) -> Result<User, StorageError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());

        for other in users.values().filter(|u| u.id != user.id) {
            if other.username == user.username {
                return Err(StorageError::AlreadyExists("Username".into()));
            }
            if other.email == user.email {
                return Err(StorageError::AlreadyExists("Email".into()));
            }
            if other.institution_id == user.institution_id {
                return Err(StorageError::AlreadyExists("Institution ID".into()));
            }
            if other.api_key == user.api_key {
                return Err(StorageError::AlreadyExists("API key".into()));
            }
        }

        if users.contains_key(&user.id) {
            user.updated_at = Utc::now();
        } else {
            info!(username = %user.username, "Registering API client");
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
