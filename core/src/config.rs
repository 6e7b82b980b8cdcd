//! Client configuration.
//!
//! Replaces a module-level HTTP client with an explicit value handed to
//! `OperadoraClient::with_config` and, for the timeout, to the transport.

use std::time::Duration;

use crate::error::ApiError;
use crate::query::QueryEncoding;

/// Base URL of the analytics backend in a local development setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const ENV_BASE_URL: &str = "OPERADORAS_API_URL";
const ENV_TIMEOUT: &str = "OPERADORAS_API_TIMEOUT";
const ENV_RAW_QUERY: &str = "OPERADORAS_API_RAW_QUERY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub query_encoding: QueryEncoding,
    /// Whole-request timeout applied by the transport. `None` waits forever.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query_encoding: QueryEncoding::default(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, starting from defaults.
    ///
    /// - `OPERADORAS_API_URL`: base URL
    /// - `OPERADORAS_API_TIMEOUT`: request timeout in whole seconds
    /// - `OPERADORAS_API_RAW_QUERY`: if set, send query values unescaped
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!("invalid {ENV_TIMEOUT} value: {timeout}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if lookup(ENV_RAW_QUERY).is_some() {
            config.query_encoding = QueryEncoding::Verbatim;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.query_encoding = encoding;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The base URL must be an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("invalid base URL {}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ApiError::InvalidConfig(format!(
                "unsupported URL scheme: {other}"
            ))),
        }
    }
}
