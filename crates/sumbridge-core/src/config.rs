//! Portal endpoint configuration
//!
//! All outbound URLs live under one portal host. They are fixed at deploy
//! time and derived from a single base URL.

use std::time::Duration;

/// Default portal host
pub const DEFAULT_PORTAL_URL: &str = "https://sum.unmsm.edu.pe";

const LOGIN_PATH: &str = "/alumnoWebSum/login";
const ACTIVE_SESSION_PATH: &str = "/alumnoWebSum/sesionIniciada";
const RESTART_SESSION_PATH: &str = "/alumnoWebSum/reiniciarSesion?us=";
const COURSE_REPORT_PATH: &str =
    "/alumnoWebSum/v2/reportes/matricula?accion=obtenerAlumnoMatricula";

/// The URL constants the login flow compares against and calls.
///
/// Classification uses exact string equality against `login_url` and
/// `active_session_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalEndpoints {
    /// Login form page; also the POST target
    pub login_url: String,
    /// Where the portal lands when the user already has an open session
    pub active_session_url: String,
    /// Session reset endpoint; the username is appended verbatim
    pub restart_session_url: String,
    /// JSON course report
    pub course_report_url: String,
}

impl PortalEndpoints {
    /// Derive every endpoint from a base URL such as `https://sum.unmsm.edu.pe`
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login_url: format!("{}{}", base, LOGIN_PATH),
            active_session_url: format!("{}{}", base, ACTIVE_SESSION_PATH),
            restart_session_url: format!("{}{}", base, RESTART_SESSION_PATH),
            course_report_url: format!("{}{}", base, COURSE_REPORT_PATH),
        }
    }

    /// Restart endpoint for one user.
    ///
    /// The username is appended as-is, without percent-encoding.
    pub fn restart_url_for(&self, username: &str) -> String {
        format!("{}{}", self.restart_session_url, username)
    }
}

impl Default for PortalEndpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_PORTAL_URL)
    }
}

/// Portal client configuration
#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    pub endpoints: PortalEndpoints,
    /// Per-request timeout; `None` leaves the transport default (no timeout)
    pub timeout: Option<Duration>,
}

impl PortalConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoints: PortalEndpoints::from_base(base_url),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
