//! API Key Credential Handler
//!
//! Validates `API-Key` / `API-Secret` pairs against a backend.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{AuthError, Result};
use crate::types::{ApiClient, ApiCredentials};

/// A registered API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyInfo {
    /// Owner of the key
    pub owner: String,

    /// Secret the client must present alongside the key
    pub secret: String,
}

impl ApiKeyInfo {
    pub fn new(owner: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            secret: secret.into(),
        }
    }
}

/// Backend trait for API key lookup
///
/// Implement this to validate keys against a different store.
#[async_trait]
pub trait ApiKeyBackend: Send + Sync {
    /// Look up the key info for `api_key`
    async fn lookup(&self, api_key: &str) -> Result<Option<ApiKeyInfo>>;

    /// Get a description of this backend
    fn description(&self) -> &str {
        "API key backend"
    }
}

/// Validates presented credentials against a backend
pub struct ApiKeyHandler {
    backend: Box<dyn ApiKeyBackend>,
}

impl ApiKeyHandler {
    pub fn new<B: ApiKeyBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Validate credentials and return the authenticated client
    pub async fn validate(&self, credentials: &ApiCredentials) -> Result<ApiClient> {
        debug!(backend = self.backend.description(), "Validating API key");

        let info = self
            .backend
            .lookup(&credentials.key)
            .await?
            .ok_or(AuthError::ApiKeyNotFound)?;

        if info.secret != credentials.secret {
            warn!(owner = %info.owner, "API secret mismatch");
            return Err(AuthError::SecretMismatch);
        }

        Ok(ApiClient::new(credentials.key.clone(), info.owner))
    }
}
