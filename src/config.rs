use std::fmt;
use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "rxrisk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the risk-scoring endpoint.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
/// Environment variable holding the bearer credential for the endpoint.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable overriding the local listen address.
pub const BIND_VAR: &str = "RXRISK_BIND";

/// Default listen address for the form server.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "rxrisk_lib=info,rxrisk=info"
}

/// Errors raised while resolving deployment configuration.
///
/// Any of these is fatal at startup: the form is never served without
/// a usable backend endpoint and credential.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required setting {0} is not set")]
    MissingSetting(&'static str),
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBind { var: &'static str, value: String },
}

/// Backend endpoint and credential for the risk-scoring service.
#[derive(Clone)]
pub struct BackendConfig {
    pub endpoint: reqwest::Url,
    api_key: String,
}

impl BackendConfig {
    pub fn new(endpoint: reqwest::Url, api_key: impl Into<String>) -> Self {
        Self {
            endpoint,
            api_key: api_key.into(),
        }
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve using an arbitrary lookup (process env, test map, ...).
    ///
    /// Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, BACKEND_URL_VAR)?;
        let api_key = required(&lookup, API_KEY_VAR)?;

        let endpoint = reqwest::Url::parse(&url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or(ConfigError::InvalidUrl {
                var: BACKEND_URL_VAR,
                value: url,
            })?;

        Ok(Self { endpoint, api_key })
    }

    /// Bearer credential sent in the `Authorization` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// The credential must never reach logs.
impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Local HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(BIND_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let bind = raw.parse().map_err(|_| ConfigError::InvalidBind {
            var: BIND_VAR,
            value: raw.clone(),
        })?;

        Ok(Self { bind })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingSetting(var))
}
