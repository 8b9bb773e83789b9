//! Client configuration

use crate::{ClientError, ClientResult};

/// Default API base URL (local development server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the sales API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8080" or ".../api")
    pub base_url: String,

    /// Bearer token restored from a previous login
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `SALES_API_URL` (default [`DEFAULT_BASE_URL`])
    /// - `SALES_API_TOKEN` (optional, empty = none)
    /// - `SALES_API_TIMEOUT` seconds (default [`DEFAULT_TIMEOUT_SECS`])
    pub fn from_env() -> ClientResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same keys as [`ClientConfig::from_env`], read through `lookup`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let base_url = lookup("SALES_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("SALES_API_TIMEOUT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("SALES_API_TIMEOUT must be an integer, got {raw:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            base_url,
            token: lookup("SALES_API_TOKEN").filter(|s| !s.is_empty()),
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
