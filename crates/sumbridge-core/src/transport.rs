//! HTTP transport and per-session cookie jar
//!
//! The transport issues the portal requests, follows redirects and keeps the
//! cookies the portal sets. One [`HttpTransport`] owns one jar, so one
//! instance corresponds to one logical portal session.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

use crate::config::PortalConfig;
use crate::error::TransportError;
use crate::jar::PortalJar;
use crate::types::SessionCookies;

const ACCEPT_HTML: &str = "text/html";
const ACCEPT_JSON: &str = "application/json";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// A fully read portal response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalResponse {
    status: u16,
    final_url: String,
    body: String,
}

impl PortalResponse {
    pub fn new(status: u16, final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            final_url: final_url.into(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// URL the response landed on after every redirect was followed
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Requests the login flow and the report component need from the portal.
#[async_trait]
pub trait PortalTransport: Send + Sync {
    /// Anonymous GET with `Accept: text/html`
    async fn get(&self, url: &str) -> Result<PortalResponse, TransportError>;

    /// GET with an explicit `Cookie` header and `Accept: application/json`
    async fn get_with_cookies(
        &self,
        url: &str,
        cookie_header: &str,
    ) -> Result<PortalResponse, TransportError>;

    /// Form POST; see [`encode_form_body`] for how the body is built.
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<PortalResponse, TransportError>;

    /// Snapshot of every cookie currently held for the portal host, any path
    fn cookies(&self) -> SessionCookies;
}

/// Join `key=value` pairs with `&` in caller order.
///
/// Values are NOT percent-encoded. The portal has only been observed with
/// raw values, so callers must pre-encode anything that needs it.
pub fn encode_form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// `reqwest`-backed transport.
///
/// Built with [`HttpTransport::new`] it carries its own cookie jar; built
/// with [`HttpTransport::stateless`] it sends only the cookies it is given.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    jar: Option<Arc<PortalJar>>,
    /// Portal host whose cookies make up the snapshot
    portal_host: String,
}

impl HttpTransport {
    /// Transport with a fresh, private cookie jar
    pub fn new(config: &PortalConfig) -> Result<Self, TransportError> {
        Self::build(config, Some(Arc::new(PortalJar::new())))
    }

    /// Transport without a jar, for replaying harvested cookies
    pub fn stateless(config: &PortalConfig) -> Result<Self, TransportError> {
        Self::build(config, None)
    }

    fn build(config: &PortalConfig, jar: Option<Arc<PortalJar>>) -> Result<Self, TransportError> {
        let login_url = &config.endpoints.login_url;
        let portal_host = Url::parse(login_url)
            .map_err(|e| TransportError::new(login_url.as_str(), format!("Invalid portal URL: {}", e)))?
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| TransportError::new(login_url.as_str(), "Portal URL has no host"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(ref jar) = jar {
            builder = builder.cookie_provider(jar.clone());
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::new(login_url.as_str(), e.to_string()))?;

        Ok(Self {
            client,
            jar,
            portal_host,
        })
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<PortalResponse, TransportError> {
        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "Portal request failed");
            TransportError::new(url, e.to_string())
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| {
            error!(url = %url, error = %e, "Failed to read portal response body");
            TransportError::new(url, e.to_string())
        })?;

        debug!(url = %url, status, final_url = %final_url, "Portal responded");

        Ok(PortalResponse {
            status,
            final_url,
            body,
        })
    }
}

#[async_trait]
impl PortalTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<PortalResponse, TransportError> {
        let request = self.client.get(url).header(ACCEPT, ACCEPT_HTML);
        self.send(url, request).await
    }

    async fn get_with_cookies(
        &self,
        url: &str,
        cookie_header: &str,
    ) -> Result<PortalResponse, TransportError> {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_JSON)
            .header(COOKIE, cookie_header);
        self.send(url, request).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<PortalResponse, TransportError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, CONTENT_TYPE_FORM)
            .header(ACCEPT, ACCEPT_HTML)
            .body(encode_form_body(fields));
        self.send(url, request).await
    }

    fn cookies(&self) -> SessionCookies {
        self.jar
            .as_ref()
            .map(|jar| jar.snapshot(&self.portal_host))
            .unwrap_or_default()
    }
}
