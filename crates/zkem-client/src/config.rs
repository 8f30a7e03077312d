//! Registry client configuration.
//!
//! Base URLs default to the hosted registry; override via environment
//! variables or explicit construction for staging and tests.

use std::sync::Arc;

use url::Url;
use zeroize::Zeroizing;

use crate::auth::AuthProvider;

/// Configuration for connecting to the proof registry.
///
/// Custom `Debug` implementation redacts the API key to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct RegistryConfig {
    /// Base URL of the registry API.
    pub base_url: Url,
    /// Base URL of the DKIM key archive.
    pub dkim_archive_url: Url,
    /// API key sent with every request, if configured.
    pub api_key: Option<Zeroizing<String>>,
    /// Bearer-token provider, if the caller is authenticated.
    pub auth: Option<Arc<dyn AuthProvider>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url)
            .field("dkim_archive_url", &self.dkim_archive_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("auth", &self.auth.as_ref().map(|_| "<provider>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ZKEM_REGISTRY_URL` (default: `https://registry.zk.email`)
    /// - `ZKEM_DKIM_ARCHIVE_URL` (default: `https://archive.zk.email`)
    /// - `ZKEM_API_KEY` (optional)
    /// - `ZKEM_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("ZKEM_REGISTRY_URL", "https://registry.zk.email")?,
            dkim_archive_url: env_url("ZKEM_DKIM_ARCHIVE_URL", "https://archive.zk.email")?,
            api_key: std::env::var("ZKEM_API_KEY").ok().map(Zeroizing::new),
            auth: None,
            timeout_secs: std::env::var("ZKEM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing both services at one base URL
    /// (for tests against a mock server).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base` cannot be parsed.
    pub fn for_base_url(base: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base)
            .map_err(|e| ConfigError::InvalidUrl(base.to_string(), e.to_string()))?;
        Ok(Self {
            base_url: url.clone(),
            dkim_archive_url: url,
            api_key: None,
            auth: None,
            timeout_secs: 5,
        })
    }

    /// Attach an API key.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(Zeroizing::new(key.to_string()));
        self
    }

    /// Attach a bearer-token provider.
    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL could not be parsed.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
