//! Core types for API-key validation

use http::HeaderMap;

use crate::error::{AuthError, Result};

/// Default header carrying the API key
pub const DEFAULT_KEY_HEADER: &str = "API-Key";

/// Default header carrying the API secret
pub const DEFAULT_SECRET_HEADER: &str = "API-Secret";

/// Credentials presented by an API client
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl ApiCredentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Read credentials from request headers.
    ///
    /// Both headers must be present and non-blank.
    pub fn from_headers(headers: &HeaderMap, key_header: &str, secret_header: &str) -> Result<Self> {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (read(key_header), read(secret_header)) {
            (Some(key), Some(secret)) => Ok(Self { key, secret }),
            _ => Err(AuthError::MissingCredentials),
        }
    }
}

/// A client whose credentials validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    /// Key the client authenticated with
    pub api_key: String,
    /// Owner of the key (username)
    pub owner: String,
}

impl ApiClient {
    pub fn new(api_key: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            owner: owner.into(),
        }
    }

    /// Principal string used in logs: `apikey:{owner}`
    pub fn principal(&self) -> String {
        format!("apikey:{}", self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_credentials_from_headers() {
        let map = headers(&[("api-key", "key-1"), ("api-secret", "s3cret")]);
        let creds = ApiCredentials::from_headers(&map, DEFAULT_KEY_HEADER, DEFAULT_SECRET_HEADER).unwrap();
        assert_eq!(creds, ApiCredentials::new("key-1", "s3cret"));
    }

    #[test]
    fn test_missing_secret() {
        let map = headers(&[("api-key", "key-1")]);
        let err = ApiCredentials::from_headers(&map, DEFAULT_KEY_HEADER, DEFAULT_SECRET_HEADER).unwrap_err();
        assert_eq!(err, AuthError::MissingCredentials);
    }

    #[test]
    fn test_blank_key() {
        let map = headers(&[("api-key", "   "), ("api-secret", "s3cret")]);
        assert!(ApiCredentials::from_headers(&map, DEFAULT_KEY_HEADER, DEFAULT_SECRET_HEADER).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", ApiCredentials::new("k", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_principal() {
        assert_eq!(ApiClient::new("k", "alice").principal(), "apikey:alice");
    }
}
