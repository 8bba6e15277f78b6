//! API-key gate in front of the portal endpoints

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use sumbridge_auth::{ApiCredentials, ApiKeyBackend, ApiKeyInfo, AuthError};
use tracing::{debug, warn};

use super::error::ApiError;
use super::handlers::AppState;
use crate::storage::UserStore;

/// Resolves API keys against the user store
#[derive(Debug, Clone)]
pub struct StoreApiKeyBackend {
    store: Arc<dyn UserStore>,
}

impl StoreApiKeyBackend {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApiKeyBackend for StoreApiKeyBackend {
    async fn lookup(&self, api_key: &str) -> sumbridge_auth::Result<Option<ApiKeyInfo>> {
        let user = self
            .store
            .find_by_api_key(api_key)
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        Ok(user.map(|u| ApiKeyInfo::new(u.username, u.api_secret)))
    }

    fn description(&self) -> &str {
        "user store"
    }
}

/// Reject requests without a valid `API-Key` / `API-Secret` pair.
///
/// Only the configured key and secret headers are read; the portal
/// `Cookie` header passes through untouched.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.require_api_key {
        return Ok(next.run(request).await);
    }

    let credentials = ApiCredentials::from_headers(
        request.headers(),
        &state.config.api_key_header,
        &state.config.api_secret_header,
    )
    .inspect_err(|_| warn!(path = %request.uri().path(), "Request without API credentials"))?;

    let client = state.api_keys.validate(&credentials).await?;
    debug!(principal = %client.principal(), "API client authenticated");

    Ok(next.run(request).await)
}
