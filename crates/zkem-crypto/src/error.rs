//! # Cryptographic Error Types
//!
//! Structured errors for key-hash computation and key-material decoding.

use thiserror::Error;

/// Errors from cryptographic operations in the zkem SDK.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The DKIM key material could not be decoded from base64.
    #[error("base64 decode error for key material: {0}")]
    Base64Decode(String),

    /// The key is structurally invalid for the requested hash family.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// The backend hash computation failed.
    #[error("key hash computation failed: {0}")]
    HashFailed(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}
