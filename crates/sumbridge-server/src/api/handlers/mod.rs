//! API handlers

mod courses;
mod login;

pub use courses::*;
pub use login::*;

use std::sync::Arc;
use sumbridge_auth::ApiKeyHandler;
use sumbridge_core::PortalConfig;

use super::auth::StoreApiKeyBackend;
use crate::config::ServerConfig;
use crate::storage::UserStore;

/// Application state shared across handlers
pub struct AppState {
    /// Portal endpoints; each request builds its own transport from these
    pub portal: PortalConfig,
    pub store: Arc<dyn UserStore>,
    pub api_keys: ApiKeyHandler,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            portal: config.portal(),
            api_keys: ApiKeyHandler::new(StoreApiKeyBackend::new(store.clone())),
            store,
            config,
        }
    }
}
