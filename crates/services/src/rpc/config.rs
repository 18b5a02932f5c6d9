use std::env;
use std::time::Duration;

use url::Url;

use super::endpoint::Endpoint;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcConfig {
    pub base_url: Url,
    /// Value of the `sid` session cookie, when already logged in.
    pub session_id: Option<String>,
    pub timeout_secs: u64,
}

impl RpcConfig {
    /// The base path always ends with `/` so endpoints resolve below it.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            session_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Parse a base URL given as text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(Url::parse(raw.trim())?))
    }

    /// Read `AUDIT_BASE_URL`, `AUDIT_SID` and `AUDIT_RPC_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = env::var("AUDIT_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let mut config = Self::parse(&base)?;
        config.session_id = env::var("AUDIT_SID").ok().filter(|v| !v.trim().is_empty());
        if let Ok(raw) = env::var("AUDIT_RPC_TIMEOUT_SECS") {
            config.timeout_secs = parse_timeout(&raw)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of `endpoint`, keeping any path prefix of the base URL.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the joined URL is invalid.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, url::ParseError> {
        self.base_url.join(&endpoint.path())
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
