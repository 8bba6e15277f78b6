//! Per-session cookie jar
//!
//! Wraps reqwest's [`Jar`] so outgoing requests still get RFC path and
//! domain matching, while also keeping every cookie the portal set. The
//! harvest snapshot is answered by host alone: a cookie scoped to
//! `/alumnoWebSum/v2` is returned even though the login page would never
//! send it.

use cookie::time::OffsetDateTime;
use cookie::Cookie;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use std::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::types::SessionCookies;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredCookie {
    name: String,
    value: String,
    domain: String,
    path: String,
}

impl StoredCookie {
    fn same_slot(&self, other: &StoredCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    fn visible_to(&self, host: &str) -> bool {
        host == self.domain
            || host
                .strip_suffix(self.domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

/// Cookie jar that remembers every cookie it was handed, in arrival order
#[derive(Debug, Default)]
pub struct PortalJar {
    inner: Jar,
    stored: RwLock<Vec<StoredCookie>>,
}

impl PortalJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every live cookie whose domain covers `host`, regardless of path
    pub fn snapshot(&self, host: &str) -> SessionCookies {
        let host = host.to_ascii_lowercase();
        let stored = self.stored.read().unwrap_or_else(|e| e.into_inner());

        SessionCookies::new(
            stored
                .iter()
                .filter(|c| c.visible_to(&host))
                .map(|c| format!("{}={}", c.name, c.value))
                .collect(),
        )
    }

    fn record(&self, header: &HeaderValue, url: &Url) {
        let Some(parsed) = header.to_str().ok().and_then(|s| Cookie::parse(s).ok()) else {
            debug!(url = %url, "Ignoring unparseable Set-Cookie");
            return;
        };

        let domain = match parsed.domain() {
            Some(d) => d.trim_start_matches('.').to_ascii_lowercase(),
            None => url.host_str().unwrap_or_default().to_ascii_lowercase(),
        };
        let path = parsed
            .path()
            .map(str::to_string)
            .unwrap_or_else(|| default_path(url));

        let cookie = StoredCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
        };

        let mut stored = self.stored.write().unwrap_or_else(|e| e.into_inner());
        let slot = stored.iter().position(|c| c.same_slot(&cookie));

        match (slot, is_expired(&parsed)) {
            (Some(i), true) => {
                stored.remove(i);
            }
            (Some(i), false) => stored[i] = cookie,
            (None, true) => {}
            (None, false) => stored.push(cookie),
        }
    }
}

impl CookieStore for PortalJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();
        for header in &headers {
            self.record(header, url);
        }
        self.inner.set_cookies(&mut headers.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.inner.cookies(url)
    }
}

/// Directory of the request path, as a cookie without `Path` is scoped
fn default_path(url: &Url) -> String {
    match url.path().rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => url.path()[..i].to_string(),
    }
}

fn is_expired(cookie: &Cookie<'_>) -> bool {
    if cookie.max_age().is_some_and(|age| age.is_zero() || age.is_negative()) {
        return true;
    }
    cookie
        .expires_datetime()
        .is_some_and(|at| at <= OffsetDateTime::now_utc())
}
