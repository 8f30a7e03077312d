//! # Mock Poseidon Key Hasher
//!
//! A deterministic, transparent stand-in for the backend Poseidon
//! implementation. Produces SHA-256-based commitments under a domain
//! separation tag, so mock commitments can never collide with the real
//! SHA-256 key-hash family. No circuit compatibility, no zero-knowledge
//! guarantees; development and testing only.

use sha2::{Digest, Sha256};

use crate::error::CryptoError;
use crate::pubkey::{PoseidonKeyHasher, PubkeyHash};

/// Deterministic mock implementation of [`PoseidonKeyHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MockKeyHasher;

impl PoseidonKeyHasher for MockKeyHasher {
    fn hash_rsa_der(&self, der: &[u8]) -> Result<PubkeyHash, CryptoError> {
        if der.is_empty() {
            return Err(CryptoError::InvalidKey("empty DER input".into()));
        }
        let mut hasher = Sha256::new();
        hasher.update(b"zkem-mock-poseidon/v1");
        hasher.update(der);
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        // Clear the top byte so the value always fits a ~254-bit field
        // element, matching the range of a real Poseidon output.
        bytes[0] = 0;
        Ok(PubkeyHash::from_bytes(bytes))
    }
}
