//! sumbridge server binary
//!
//! Runs the REST bridge in front of the SUM student portal.

use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sumbridge_server::{create_router, AppState, MemoryStore, ServerConfig, User, UserStore};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().expect("Invalid SUMBRIDGE_* configuration");

    // Initialize logging
    let log_level = config.log_level.parse().unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // Initialize storage
    let store: Arc<dyn UserStore> = Arc::new(MemoryStore::new());

    if let Some(seed) = &config.bootstrap {
        let user = User::new(
            seed.username.clone(),
            format!("{}@localhost", seed.username),
            format!("bootstrap-{}", seed.username),
            seed.api_key.clone(),
            seed.api_secret.clone(),
        );
        store
            .save(user)
            .await
            .expect("Failed to seed bootstrap API client");
    }

    if !config.require_api_key {
        tracing::warn!("API-key enforcement is disabled");
    }

    info!(
        port = config.port,
        portal = %config.portal_url,
        require_api_key = config.require_api_key,
        "Starting sumbridge server"
    );

    let port = config.port;
    let state = Arc::new(AppState::new(config, store));
    let app = create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "sumbridge listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
