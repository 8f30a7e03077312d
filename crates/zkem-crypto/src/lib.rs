//! # zkem-crypto -- DKIM Public-Key Hash Family
//!
//! A proof binds itself to a sender domain through a commitment to the
//! domain's DKIM public key. Two hash families exist, matching the two
//! output encodings the proving backends use:
//!
//! - **SHA-256 over the DER-encoded key** (SP1). Implemented concretely
//!   here via `sha2`.
//! - **Poseidon over the chunked RSA modulus** (Circom, Noir). A
//!   circuit-friendly hash whose parameterization is owned by the proving
//!   backend; exposed here as the [`PoseidonKeyHasher`] seam with a
//!   deterministic mock for development and testing.
//!
//! The crate also carries [`DkimKey`], the key-material record served by
//! the DKIM archive directory.

pub mod error;
pub mod keys;
pub mod mock;
pub mod pubkey;

pub use error::CryptoError;
pub use keys::DkimKey;
pub use mock::MockKeyHasher;
pub use pubkey::{sha256_pubkey_hash, PoseidonKeyHasher, PubkeyHash};
