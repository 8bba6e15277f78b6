//! Course report fetch and reshape
//!
//! Replays harvested session cookies against the portal's JSON enrollment
//! report and maps the vendor payload into [`CourseRecord`]s.

use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::error::{ReportError, TransportError};
use crate::transport::{HttpTransport, PortalTransport};
use crate::types::{CourseRecord, VendorReport};

/// Reshape a raw report body, preserving vendor order.
///
/// Either every entry maps or the whole call fails; there are no partial
/// lists.
pub fn parse_report(body: &str) -> Result<Vec<CourseRecord>, ReportError> {
    let report: VendorReport = serde_json::from_str(body)?;
    Ok(report
        .data
        .matricula
        .into_iter()
        .map(CourseRecord::from)
        .collect())
}

/// Fetches the enrollment report over a transport
pub struct CourseReport<T> {
    transport: T,
    report_url: String,
}

impl CourseReport<HttpTransport> {
    /// Report client over a jar-less transport; cookies come from the caller
    pub fn for_portal(config: &PortalConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::stateless(config)?;
        Ok(Self::new(transport, config.endpoints.course_report_url.clone()))
    }
}

impl<T: PortalTransport> CourseReport<T> {
    pub fn new(transport: T, report_url: impl Into<String>) -> Self {
        Self {
            transport,
            report_url: report_url.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and reshape the courses visible to the session in `cookie_header`
    pub async fn fetch(&self, cookie_header: &str) -> Result<Vec<CourseRecord>, ReportError> {
        let response = self
            .transport
            .get_with_cookies(&self.report_url, cookie_header)
            .await?;

        if !response.is_ok() {
            warn!(status = response.status(), "Course report returned non-200");
            return Err(ReportError::UnexpectedStatus {
                status: response.status(),
            });
        }

        let courses = parse_report(response.body()).inspect_err(|e| {
            warn!(error = ?e, "Course report did not match the expected envelope");
        })?;

        info!(count = courses.len(), "Fetched course report");
        Ok(courses)
    }
}
