//! Server configuration read from the environment

use std::time::Duration;

use sumbridge_auth::{DEFAULT_KEY_HEADER, DEFAULT_SECRET_HEADER};
use sumbridge_core::{PortalConfig, DEFAULT_PORTAL_URL};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_BOOTSTRAP_USERNAME: &str = "bootstrap";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// API client seeded into the store at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapClient {
    pub username: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
    pub portal_url: String,
    pub portal_timeout: Option<Duration>,
    /// When false the API-key layer lets every request through
    pub require_api_key: bool,
    pub api_key_header: String,
    pub api_secret_header: String,
    pub bootstrap: Option<BootstrapClient>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.into(),
            portal_url: DEFAULT_PORTAL_URL.into(),
            portal_timeout: None,
            require_api_key: true,
            api_key_header: DEFAULT_KEY_HEADER.into(),
            api_secret_header: DEFAULT_SECRET_HEADER.into(),
            bootstrap: None,
        }
    }
}

impl ServerConfig {
    /// Read `SUMBRIDGE_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("SUMBRIDGE_PORT") {
            config.port = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "SUMBRIDGE_PORT",
                expected: "a valid port number",
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup("SUMBRIDGE_LOG_LEVEL") {
            config.log_level = value;
        }

        if let Some(value) = lookup("SUMBRIDGE_PORTAL_URL") {
            config.portal_url = value;
        }

        if let Some(value) = lookup("SUMBRIDGE_PORTAL_TIMEOUT_SECS") {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "SUMBRIDGE_PORTAL_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: value.clone(),
            })?;
            config.portal_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(value) = lookup("SUMBRIDGE_REQUIRE_API_KEY") {
            config.require_api_key = parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "SUMBRIDGE_REQUIRE_API_KEY",
                expected: "true or false",
                value,
            })?;
        }

        if let Some(value) = lookup("SUMBRIDGE_API_KEY_HEADER") {
            config.api_key_header = value;
        }

        if let Some(value) = lookup("SUMBRIDGE_API_SECRET_HEADER") {
            config.api_secret_header = value;
        }

        if let (Some(api_key), Some(api_secret)) = (
            lookup("SUMBRIDGE_BOOTSTRAP_API_KEY"),
            lookup("SUMBRIDGE_BOOTSTRAP_API_SECRET"),
        ) {
            config.bootstrap = Some(BootstrapClient {
                username: lookup("SUMBRIDGE_BOOTSTRAP_USERNAME")
                    .unwrap_or_else(|| DEFAULT_BOOTSTRAP_USERNAME.into()),
                api_key,
                api_secret,
            });
        }

        Ok(config)
    }

    /// Portal endpoints and timeout for the session-bridging engine
    pub fn portal(&self) -> PortalConfig {
        let portal = PortalConfig::new(&self.portal_url);
        match self.portal_timeout {
            Some(timeout) => portal.with_timeout(timeout),
            None => portal,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.portal_url, "https://sum.unmsm.edu.pe");
        assert!(config.require_api_key);
        assert_eq!(config.api_key_header, "API-Key");
        assert_eq!(config.api_secret_header, "API-Secret");
        assert!(config.portal_timeout.is_none());
        assert!(config.bootstrap.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = from_vars(&[
            ("SUMBRIDGE_PORT", "9000"),
            ("SUMBRIDGE_PORTAL_URL", "http://localhost:3000"),
            ("SUMBRIDGE_PORTAL_TIMEOUT_SECS", "15"),
            ("SUMBRIDGE_REQUIRE_API_KEY", "false"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.portal_timeout, Some(Duration::from_secs(15)));
        assert!(!config.require_api_key);
        assert_eq!(
            config.portal().endpoints.login_url,
            "http://localhost:3000/alumnoWebSum/login"
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = from_vars(&[("SUMBRIDGE_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("SUMBRIDGE_PORT"));
    }

    #[test]
    fn test_invalid_bool() {
        assert!(from_vars(&[("SUMBRIDGE_REQUIRE_API_KEY", "maybe")]).is_err());
    }

    #[test]
    fn test_bootstrap_needs_key_and_secret() {
        let config = from_vars(&[("SUMBRIDGE_BOOTSTRAP_API_KEY", "k")]).unwrap();
        assert!(config.bootstrap.is_none());

        let config = from_vars(&[
            ("SUMBRIDGE_BOOTSTRAP_API_KEY", "k"),
            ("SUMBRIDGE_BOOTSTRAP_API_SECRET", "s"),
        ])
        .unwrap();
        let bootstrap = config.bootstrap.unwrap();
        assert_eq!(bootstrap.username, "bootstrap");
        assert_eq!(bootstrap.api_key, "k");
    }
}
