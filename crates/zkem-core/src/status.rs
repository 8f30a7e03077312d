//! # Proof Status States
//!
//! The lifecycle states of an in-flight or completed proof. A remote
//! proof is created `InProgress` and moves exactly once, to `Done` or
//! `Failed`; a local proof is constructed already `Done` because local
//! proving completes synchronously before the entity exists.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofStatus {
    /// Status has not been observed yet (wire sentinel).
    None,
    /// The backend has acknowledged the proof request and is proving.
    InProgress,
    /// Proving completed successfully. Terminal state.
    Done,
    /// Proving failed. Terminal state.
    Failed,
}

impl ProofStatus {
    /// Whether this is a terminal state (no further transitions).
    ///
    /// Once terminal, a proof's result fields never change again and
    /// status checks are answered from cache without a network call.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}
