//! Portal login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    Json,
};
use cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use sumbridge_core::{LoginError, LoginOrchestrator, SessionCookies};
use tracing::{info, warn};

use super::AppState;
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;

/// Request to log into the portal
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = BTreeMap::new();
        if self.user.trim().is_empty() {
            errors.insert("user".to_string(), "Username is mandatory".to_string());
        }
        if self.password.trim().is_empty() {
            errors.insert("password".to_string(), "Password is mandatory".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

/// Harvested portal session
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(rename = "sessionCookies")]
    pub session_cookies: Vec<String>,
}

/// Log into the portal and hand back its session cookies
///
/// POST /user/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<ApiResponse<LoginResponse>>), ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::MalformedJson(rejection.body_text()))?;
    request.validate()?;

    // Fresh jar per request so concurrent logins never share cookies
    let orchestrator = LoginOrchestrator::for_portal(&state.portal).map_err(LoginError::from)?;

    let success = orchestrator
        .login(&request.user, &request.password)
        .await
        .inspect_err(|e| warn!(error = %e, "Portal login failed"))?;

    info!(cookie_count = success.cookies.len(), "Portal session established");

    let headers = set_cookie_headers(&success.cookies);
    let message = success.message;
    let body = LoginResponse {
        message: message.clone(),
        session_cookies: success.cookies.into_inner(),
    };

    Ok((headers, Json(ApiResponse::success(message, body))))
}

/// One hardened `Set-Cookie` per harvested `name=value` pair
fn set_cookie_headers(cookies: &SessionCookies) -> HeaderMap {
    let mut headers = HeaderMap::new();

    // Split on the first '=' only; values are passed through unvalidated
    for (name, value) in cookies.pairs() {
        let cookie = Cookie::build((name, value))
            .http_only(true)
            .secure(true)
            .path("/")
            .same_site(SameSite::Strict)
            .build();

        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            headers.append(SET_COOKIE, value);
        }
    }

    headers
}
