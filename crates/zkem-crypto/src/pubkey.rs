//! # Public-Key Hash Commitments
//!
//! [`PubkeyHash`] is the 32-byte commitment a proof exposes to bind
//! itself to a sender domain's DKIM key. The SHA-256 family is computed
//! here; the Poseidon family is computed behind the [`PoseidonKeyHasher`]
//! seam because its parameterization (field, chunking of the RSA
//! modulus, round constants) is owned by the proving backend.

use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// A 32-byte public-key hash commitment.
///
/// Big-endian byte order for field-element-valued hashes, so that the
/// value compares equal to the bytes of the decoded public signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubkeyHash {
    bytes: [u8; 32],
}

impl PubkeyHash {
    /// Wrap an existing 32-byte hash value.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Access the raw 32-byte hash value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Return the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for PubkeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the SHA-256 key hash over a DER-encoded public key.
///
/// This is the hash family SP1 proofs commit to: the digest of the raw
/// DER bytes, no chunking, no field reduction.
pub fn sha256_pubkey_hash(der: &[u8]) -> PubkeyHash {
    let mut hasher = Sha256::new();
    hasher.update(der);
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    PubkeyHash::from_bytes(bytes)
}

/// The Poseidon key-hash seam used by Circom and Noir proofs.
///
/// Implementations extract the RSA modulus from the DER-encoded key,
/// split it into circuit-word chunks, and hash the chunks with the
/// backend's Poseidon parameterization. The returned value is the field
/// element as 32 big-endian bytes.
///
/// The concrete implementation ships with the proving backend bindings;
/// [`MockKeyHasher`](crate::mock::MockKeyHasher) provides a
/// deterministic stand-in for development and tests.
pub trait PoseidonKeyHasher: Send + Sync {
    /// Hash a DER-encoded RSA public key into its circuit commitment.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidKey`] if the key is not an RSA key the
    /// backend can chunk; [`CryptoError::HashFailed`] if the hash
    /// computation itself fails.
    fn hash_rsa_der(&self, der: &[u8]) -> Result<PubkeyHash, CryptoError>;
}
