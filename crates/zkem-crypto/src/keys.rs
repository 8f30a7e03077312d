//! # DKIM Key Material
//!
//! The key record served by the DKIM archive directory: one entry per
//! selector a domain has published, with the public key as base64 DER.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// A DKIM public key published by a sender domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DkimKey {
    /// The DKIM selector this key was published under.
    pub selector: String,
    /// Key algorithm tag (`"rsa"` or `"ed25519"`), if the directory
    /// reports one.
    #[serde(default)]
    pub key_type: Option<String>,
    /// The public key, base64-encoded DER.
    pub value: String,
}

impl DkimKey {
    /// Decode the key into its DER bytes.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Base64Decode`] if the stored value is not valid
    /// base64.
    pub fn der_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.value.trim())
            .map_err(|e| CryptoError::Base64Decode(e.to_string()))
    }

    /// Whether this is an RSA key (the only family the Poseidon
    /// commitment supports).
    pub fn is_rsa(&self) -> bool {
        match &self.key_type {
            Some(kind) => kind.eq_ignore_ascii_case("rsa"),
            // Absent key type defaults to RSA per RFC 6376.
            None => true,
        }
    }
}
