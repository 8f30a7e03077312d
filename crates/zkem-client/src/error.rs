//! # Client Error Types
//!
//! Transport failures, non-2xx responses, and deserialization failures
//! each carry the endpoint that produced them, so operators can
//! diagnose a failing integration from the error alone.

use thiserror::Error;

/// Errors from the registry client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("http error calling {endpoint}: {source}")]
    Http {
        /// The logical endpoint, e.g. `GET /proof/{id}/status`.
        endpoint: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-2xx status.
    #[error("registry error on {endpoint}: status {status}: {body}")]
    Api {
        /// The logical endpoint.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The response body, verbatim.
        body: String,
    },

    /// The registry answered `401 Unauthorized`. The auth provider's
    /// expiry callback has already run by the time this is returned.
    #[error("unauthorized on {endpoint}")]
    Unauthorized {
        /// The logical endpoint.
        endpoint: String,
    },

    /// A 2xx response body failed to deserialize.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The logical endpoint.
        endpoint: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Client construction or configuration failed.
    #[error("client configuration error: {0}")]
    Config(String),

    /// The auth provider failed to produce or refresh a token.
    #[error("auth provider error: {0}")]
    Auth(String),
}
