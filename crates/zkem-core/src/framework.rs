//! # Proving Framework Enumeration
//!
//! [`ZkFramework`] names the proving backend that produced (or will
//! produce) a proof. Each backend has a distinct circuit input shape and
//! a distinct public-output encoding, so every dispatch site in the
//! workspace matches exhaustively over this enum. There is no catch-all
//! arm that silently accepts an unknown backend.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The proving backend a blueprint compiles to.
///
/// A blueprint may declare different backends for client-side (local) and
/// server-side (remote) proving; the framework that actually produced a
/// given proof is recorded per proof instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZkFramework {
    /// Circom circuits proved with groth16. Public signals are a flat
    /// array of decimal-string field elements.
    Circom,
    /// SP1 zkVM execution. Public outputs are a structured object with
    /// already-named fields.
    Sp1,
    /// Noir circuits. Public outputs are a flat array of hex-string field
    /// elements with a fixed offset layout.
    Noir,
}

impl ZkFramework {
    /// The canonical wire name of this framework.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circom => "circom",
            Self::Sp1 => "sp1",
            Self::Noir => "noir",
        }
    }

    /// Whether this framework supports in-process (local) proving.
    ///
    /// SP1 proofs are produced by a remote zkVM service only.
    pub fn supports_local_proving(&self) -> bool {
        match self {
            Self::Circom | Self::Noir => true,
            Self::Sp1 => false,
        }
    }
}

impl std::fmt::Display for ZkFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ZkFramework {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circom" => Ok(Self::Circom),
            "sp1" => Ok(Self::Sp1),
            "noir" => Ok(Self::Noir),
            other => Err(ValidationError::UnknownFramework(other.to_string())),
        }
    }
}
