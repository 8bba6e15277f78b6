//! User storage collaborator
//!
//! API clients are plain records. The REST layer only needs a narrow CRUD
//! surface: look a client up by API key, check uniqueness, save. The
//! in-memory backend is the only one shipped.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use uuid::Uuid;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A registered API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub institution_id: String,
    pub student_name: Option<String>,
    pub api_key: String,
    /// Stored as provisioned; hashing is left to a real backend
    pub api_secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        institution_id: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            institution_id: institution_id.into(),
            student_name: None,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }
}

/// Storage backend trait for API clients
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Find the client owning an API key
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, StorageError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, StorageError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StorageError>;

    async fn exists_by_institution_id(&self, institution_id: &str) -> Result<bool, StorageError>;

    /// Insert or update a client; unique fields may not collide with another client
    async fn save(&self, user: User) -> Result<User, StorageError>;
}
