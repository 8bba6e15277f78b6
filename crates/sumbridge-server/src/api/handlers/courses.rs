//! Course report handler

use axum::{
    extract::State,
    http::{header::COOKIE, HeaderMap},
    Json,
};
use std::sync::Arc;
use sumbridge_core::{CourseRecord, CourseReport, ReportError};
use tracing::{info, warn};

use super::AppState;
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;

/// Join every `Cookie` header the caller sent; `None` when nothing usable is left
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    (!joined.is_empty()).then_some(joined)
}

/// Fetch the caller's enrolled courses using their portal session cookies
///
/// GET /api/courses
pub async fn get_courses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<CourseRecord>>>, ApiError> {
    let cookies = cookie_header(&headers).ok_or_else(|| {
        warn!("Course request without portal cookies");
        ApiError::MissingCookies
    })?;

    let report = CourseReport::for_portal(&state.portal).map_err(ReportError::from)?;
    let courses = report
        .fetch(&cookies)
        .await
        .inspect_err(|e| warn!(error = %e, "Course report failed"))?;

    info!(count = courses.len(), "Serving course report");
    Ok(Json(ApiResponse::success(
        "Courses fetched successfully",
        courses,
    )))
}
