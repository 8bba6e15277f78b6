//! Error types for API-key validation

use thiserror::Error;

/// Result type for API-key validation
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while validating API credentials
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Key or secret header absent or blank
    #[error("Missing API Key or Secret")]
    MissingCredentials,

    /// No client registered under this key
    #[error("API key not found")]
    ApiKeyNotFound,

    /// Key known, secret does not match
    #[error("API secret mismatch")]
    SecretMismatch,

    /// Backend lookup failed
    #[error("Backend error: {0}")]
    Backend(String),
}
