//! Error types for the session-bridging engine

use thiserror::Error;

/// Transport-level failure talking to the portal.
///
/// Connect, TLS, timeout and body-read failures all collapse into this one
/// kind; the orchestrator does not distinguish them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Request to {url} failed: {message}")]
pub struct TransportError {
    /// URL of the request that failed
    pub url: String,
    /// Underlying cause, rendered
    pub message: String,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Reasons a login attempt can fail.
///
/// Paired with [`crate::LoginSuccess`] this forms the complete login outcome:
/// exactly one variant per attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The portal bounced the form submission back to the login page
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The portal answered, but not in the shape the login flow expects
    #[error("{0}")]
    Protocol(String),

    /// The portal could not be reached
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors from fetching or reshaping the course report.
///
/// Every variant is an external-service failure from the caller's point of
/// view.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Report endpoint answered with something other than 200
    #[error("Failed to fetch courses")]
    UnexpectedStatus { status: u16 },

    /// Report body did not match the vendor envelope
    #[error("Error parsing courses response")]
    Parse(#[source] serde_json::Error),

    /// Report endpoint could not be reached
    #[error("Error fetching courses from external API")]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Parse(err)
    }
}
