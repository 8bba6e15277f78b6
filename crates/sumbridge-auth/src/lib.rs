//! API-key authentication for the sumbridge REST service
//!
//! Callers present an `API-Key` / `API-Secret` header pair. The
//! [`ApiKeyHandler`] checks the pair against an [`ApiKeyBackend`], which the
//! server implements over its user store.
//!
//! The layer only gates access to the service. It never inspects the
//! portal session cookies that flow through the service.
//!
//! ```ignore
//! use sumbridge_auth::{ApiCredentials, ApiKeyHandler};
//!
//! let handler = ApiKeyHandler::new(my_backend);
//! let client = handler.validate(&ApiCredentials::new("key-1", "s3cret")).await?;
//! println!("Principal: {}", client.principal());
//! ```

pub mod error;
pub mod handlers;
pub mod types;

pub use error::{AuthError, Result};
pub use handlers::{ApiKeyBackend, ApiKeyHandler, ApiKeyInfo};
pub use types::{ApiClient, ApiCredentials, DEFAULT_KEY_HEADER, DEFAULT_SECRET_HEADER};
