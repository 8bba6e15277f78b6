//! Portal login orchestration
//!
//! Drives one login attempt end to end:
//!
//! 1. fetch the login page
//! 2. extract the CSRF token
//! 3. submit `_csrf`, `login`, `clave` in that order
//! 4. classify the landing URL
//! 5. restart the session if the portal reports one already open
//! 6. harvest the cookie jar
//!
//! Nothing is retried. Failures come back as a typed [`LoginError`].

use tracing::{debug, info, warn};

use crate::config::{PortalConfig, PortalEndpoints};
use crate::error::{LoginError, TransportError};
use crate::extract::{HiddenFieldExtractor, TokenExtractor, CSRF_FIELD};
use crate::transport::{HttpTransport, PortalTransport};
use crate::types::LoginSuccess;

/// Outcome of one login attempt
pub type LoginOutcome = Result<LoginSuccess, LoginError>;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
const USERNAME_FIELD: &str = "login";
const PASSWORD_FIELD: &str = "clave";

/// Where the portal sent the credential submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Bounced back to the login form
    InvalidCredentials,
    /// Landed on the "session already open" page
    ActiveSession,
    /// Anywhere else
    Authenticated,
}

/// Classify a post-login landing URL.
///
/// Exact string comparison against the configured endpoints. A portal URL
/// change therefore degrades to [`Classification::Authenticated`] rather
/// than failing.
pub fn classify(final_url: &str, endpoints: &PortalEndpoints) -> Classification {
    if final_url == endpoints.login_url {
        Classification::InvalidCredentials
    } else if final_url == endpoints.active_session_url {
        Classification::ActiveSession
    } else {
        Classification::Authenticated
    }
}

/// Runs the login state machine over one transport.
///
/// The orchestrator owns its transport, and with it the cookie jar, so
/// every attempt gets an isolated session.
pub struct LoginOrchestrator<T, E = HiddenFieldExtractor> {
    transport: T,
    extractor: E,
    endpoints: PortalEndpoints,
}

impl LoginOrchestrator<HttpTransport> {
    /// Orchestrator over a fresh HTTP transport with its own jar
    pub fn for_portal(config: &PortalConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, config.endpoints.clone()))
    }
}

impl<T: PortalTransport> LoginOrchestrator<T> {
    pub fn new(transport: T, endpoints: PortalEndpoints) -> Self {
        Self {
            transport,
            extractor: HiddenFieldExtractor::default(),
            endpoints,
        }
    }
}

impl<T: PortalTransport, E: TokenExtractor> LoginOrchestrator<T, E> {
    /// Swap the token extractor
    pub fn with_extractor<E2: TokenExtractor>(self, extractor: E2) -> LoginOrchestrator<T, E2> {
        LoginOrchestrator {
            transport: self.transport,
            extractor,
            endpoints: self.endpoints,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoints(&self) -> &PortalEndpoints {
        &self.endpoints
    }

    /// Authenticate `username` against the portal and harvest its cookies
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let login_url = self.endpoints.login_url.as_str();

        debug!(url = %login_url, "Fetching login page");
        let page = self.transport.get(login_url).await?;
        if !page.is_ok() {
            warn!(status = page.status(), "Login page returned non-200");
            return Err(LoginError::Protocol("Failed to fetch login page".into()));
        }

        let token = self.extractor.extract(page.body()).ok_or_else(|| {
            warn!("CSRF token not found in login page");
            LoginError::Protocol("CSRF token not found".into())
        })?;

        debug!(username = %username, "Submitting credentials");
        let fields = [
            (CSRF_FIELD, token.as_str()),
            (USERNAME_FIELD, username),
            (PASSWORD_FIELD, password),
        ];
        let submitted = self.transport.post_form(login_url, &fields).await?;

        match classify(submitted.final_url(), &self.endpoints) {
            Classification::InvalidCredentials => {
                warn!(username = %username, "Portal rejected credentials");
                return Err(LoginError::InvalidCredentials);
            }
            Classification::ActiveSession => {
                let restart_url = self.endpoints.restart_url_for(username);
                debug!(username = %username, "Portal reports an open session, restarting it");
                self.transport.get(&restart_url).await?;
            }
            Classification::Authenticated => {
                debug!(final_url = %submitted.final_url(), "Credentials accepted");
            }
        }

        let cookies = self.transport.cookies();
        info!(username = %username, cookie_count = cookies.len(), "Portal login succeeded");

        Ok(LoginSuccess {
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            cookies,
        })
    }
}
