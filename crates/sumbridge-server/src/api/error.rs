//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use sumbridge_auth::AuthError;
use sumbridge_core::{LoginError, ReportError};
use thiserror::Error;

use super::response::ApiResponse;
use crate::storage::StorageError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("Malformed JSON Request: {0}")]
    MalformedJson(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Missing cookies")]
    MissingCookies,

    #[error("Authentication failed")]
    InvalidCredentials,

    #[error("Portal protocol error: {0}")]
    PortalProtocol(String),

    #[error("Portal unreachable: {0}")]
    PortalUnreachable(String),

    #[error("External API Error: {0}")]
    ExternalService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// `data` member of an error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status, machine code and envelope message for this error
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", "Validation failed"),
            ApiError::MalformedJson(_) => (StatusCode::BAD_REQUEST, "MALFORMED_JSON", "Malformed JSON Request"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized"),
            ApiError::MissingCookies => (StatusCode::UNAUTHORIZED, "MISSING_COOKIES", "Missing cookies"),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Authentication failed",
            ),
            ApiError::PortalProtocol(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PORTAL_PROTOCOL_ERROR",
                "Portal protocol error",
            ),
            ApiError::PortalUnreachable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PORTAL_UNREACHABLE",
                "Portal unreachable",
            ),
            ApiError::ExternalService(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXTERNAL_SERVICE_ERROR",
                "External API Error",
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let (error, details) = match self {
            ApiError::Validation(fields) => (
                "One or more fields are invalid".to_string(),
                serde_json::to_value(fields).ok(),
            ),
            ApiError::MissingCookies => ("Missing cookies".to_string(), None),
            ApiError::InvalidCredentials => ("Invalid credentials".to_string(), None),
            ApiError::MalformedJson(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::PortalProtocol(msg)
            | ApiError::PortalUnreachable(msg)
            | ApiError::ExternalService(msg)
            | ApiError::Internal(msg) => (msg, None),
        };

        let body = ApiResponse::error(
            message,
            Some(ErrorBody {
                error,
                code: code.to_string(),
                details,
            }),
        );

        (status, Json(body)).into_response()
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::Protocol(msg) => ApiError::PortalProtocol(msg),
            LoginError::Transport(e) => ApiError::PortalUnreachable(e.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::ExternalService(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Backend(msg) => ApiError::Internal(msg),
            _ => ApiError::Unauthorized("Invalid API Key or Secret".into()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumbridge_core::TransportError;

    #[test]
    fn test_login_error_mapping() {
        let (status, code, _) = ApiError::from(LoginError::InvalidCredentials).parts();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "INVALID_CREDENTIALS");

        let (status, _, message) = ApiError::from(LoginError::Protocol("CSRF token not found".into())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Portal protocol error");

        let transport = TransportError::new("https://portal/login", "connection refused");
        let (status, _, message) = ApiError::from(LoginError::from(transport)).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Portal unreachable");
    }

    #[test]
    fn test_report_error_mapping() {
        let err = ApiError::from(ReportError::UnexpectedStatus { status: 502 });
        let (status, _, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "External API Error");
    }

    #[test]
    fn test_auth_error_mapping() {
        match ApiError::from(AuthError::MissingCredentials) {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Missing API Key or Secret"),
            other => panic!("unexpected {:?}", other),
        }
        match ApiError::from(AuthError::SecretMismatch) {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Invalid API Key or Secret"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            ApiError::from(AuthError::Backend("down".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_validation_status() {
        let mut fields = BTreeMap::new();
        fields.insert("user".to_string(), "Username is mandatory".to_string());
        let response = ApiError::Validation(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
