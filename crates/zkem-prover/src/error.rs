//! # Prover Error Types
//!
//! One error enum for the whole proof lifecycle. Configuration and
//! validation classes are re-raised from the core crates; remote job
//! failure is distinct from transport failure so callers can tell "the
//! backend rejected the proof" apart from "the network broke".

use thiserror::Error;
use uuid::Uuid;

use zkem_core::{ConfigError, ProofStatus, ValidationError};

/// Errors from proof generation, polling, and verification.
#[derive(Error, Debug)]
pub enum ProverError {
    /// A precondition on blueprint or prover configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input data violated a declared bound.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Proof-input generation failed.
    #[error(transparent)]
    Witness(#[from] zkem_witness::WitnessError),

    /// The registry transport failed.
    #[error(transparent)]
    Client(#[from] zkem_client::ClientError),

    /// Public-output decoding failed.
    #[error(transparent)]
    Codec(#[from] zkem_codec::CodecError),

    /// Key-hash computation failed.
    #[error(transparent)]
    Crypto(#[from] zkem_crypto::CryptoError),

    /// The backend reported the remote proving job as failed.
    #[error("remote proving failed for proof {id}")]
    RemoteJobFailed {
        /// The failed proof id.
        id: String,
    },

    /// A result accessor was called before the proof completed.
    #[error("proof {id} is {status}, not Done")]
    NotDone {
        /// The proof id.
        id: String,
        /// The proof's current status.
        status: ProofStatus,
    },

    /// The proving worker reported an error event.
    #[error("local prover worker failed: {0}")]
    Worker(String),

    /// An injected proving or verification backend failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// Proof serialization failed.
    #[error("proof serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A packed proof is missing its blueprint binding.
    #[error("packed proof is missing the blueprintId field")]
    MissingBlueprintId,

    /// The proof's recorded blueprint does not match the attached one.
    #[error("blueprint mismatch: proof was generated against {proof} but is attached to {blueprint}")]
    BlueprintMismatch {
        /// Blueprint id recorded on the proof.
        proof: Uuid,
        /// Id of the attached blueprint.
        blueprint: Uuid,
    },

    /// A completed proof is missing its public outputs.
    #[error("proof {0} has no public outputs")]
    MissingPublicOutputs(String),

    /// A completed proof does not record which framework produced it.
    #[error("proof {0} does not record its zk framework")]
    MissingFramework(String),

    /// The blueprint declares no sender domain to verify against.
    #[error("blueprint {0} declares no sender domain")]
    MissingSenderDomain(Uuid),

    /// The proof data blob does not have the expected groth16 shape.
    #[error("malformed proof data: {0}")]
    MalformedProofData(String),
}
