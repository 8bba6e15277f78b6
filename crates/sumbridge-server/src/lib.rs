//! REST service over the SUM student portal
//!
//! Exposes two endpoints on top of `sumbridge-core`:
//!
//! - `POST /user/login` logs into the portal and returns its session cookies
//! - `GET /api/courses` replays those cookies to fetch the enrollment report
//!
//! Both sit behind an API-key gate backed by a [`UserStore`]. Responses use a
//! `{success, message, data}` envelope.

pub mod api;
pub mod config;
pub mod storage;

pub use api::auth::StoreApiKeyBackend;
pub use api::error::{ApiError, ErrorBody};
pub use api::handlers::{AppState, LoginRequest, LoginResponse};
pub use api::response::ApiResponse;
pub use api::create_router;
pub use config::{BootstrapClient, ConfigError, ServerConfig};
pub use storage::{MemoryStore, StorageError, User, UserStore};
