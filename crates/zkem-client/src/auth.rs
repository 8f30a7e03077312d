//! # Bearer-Token Authentication Seam
//!
//! The registry accepts an optional bearer token alongside the API key.
//! Token acquisition and refresh belong to the host application (OAuth
//! flows, keychains); this module defines the provider seam the
//! transport calls into.

use async_trait::async_trait;

use crate::error::ClientError;

/// Supplies bearer tokens and reacts to their expiry.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current bearer token, or `None` when the caller is
    /// anonymous.
    async fn get_token(&self) -> Result<Option<String>, ClientError>;

    /// Invoked when the registry answers `401 Unauthorized`, before the
    /// error propagates. Implementations typically refresh or discard
    /// the cached token.
    async fn on_token_expired(&self) -> Result<(), ClientError>;
}

/// An [`AuthProvider`] holding one fixed token. Suitable for service
/// credentials and tests; it cannot refresh on expiry.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wrap a fixed token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<Option<String>, ClientError> {
        Ok(Some(self.token.clone()))
    }

    async fn on_token_expired(&self) -> Result<(), ClientError> {
        // A static token has nothing to refresh.
        Ok(())
    }
}
