//! # Injected Proving Backend Seams
//!
//! The cryptographic engines are compiled artifacts owned by each
//! proving stack; this SDK drives them through handles with an
//! init-once lifecycle. The Circom engine lives behind the worker
//! protocol (see [`crate::worker`]); the Noir engine runs in-process
//! and is defined here, together with the verification seams.

use async_trait::async_trait;

use zkem_witness::{ExternalInputWithMax, NoirRegexInput};

use crate::error::ProverError;

/// A completed Noir proving run.
#[derive(Debug, Clone)]
pub struct NoirProofBundle {
    /// The proof blob.
    pub proof: serde_json::Value,
    /// Public outputs as hex-string field elements, in circuit order.
    pub public_outputs: Vec<String>,
}

/// The in-process Noir proving engine.
///
/// Must be initialized before the prover is constructed; local Noir
/// proving fails fast when no handle is supplied. Witness execution and
/// proof generation are separate steps so callers can audit the
/// witness.
#[async_trait]
pub trait NoirBackend: Send + Sync {
    /// Execute the circuit over the prepared inputs, producing a
    /// witness.
    async fn execute(
        &self,
        circuit: &serde_json::Value,
        regex_inputs: &[NoirRegexInput],
        external_inputs: &[ExternalInputWithMax],
    ) -> Result<serde_json::Value, ProverError>;

    /// Generate a proof from a witness.
    async fn prove(&self, witness: &serde_json::Value) -> Result<NoirProofBundle, ProverError>;
}

/// groth16 verification against a fetched verification key.
#[async_trait]
pub trait Groth16Verifier: Send + Sync {
    /// Verify a proof. `Ok(false)` means cryptographically invalid;
    /// errors are reserved for structural failures.
    async fn verify(
        &self,
        vkey: &str,
        proof_data: &serde_json::Value,
        public_signals: &serde_json::Value,
    ) -> Result<bool, ProverError>;
}

/// SP1 proof verification. The verifying-key hash is part of the
/// handle's construction, not this call surface.
#[async_trait]
pub trait Sp1Verifier: Send + Sync {
    /// Verify a proof against its structured public outputs.
    async fn verify(
        &self,
        proof_data: &serde_json::Value,
        public_outputs: &serde_json::Value,
    ) -> Result<bool, ProverError>;
}

/// The on-chain verifier contract surface.
///
/// Implementations encode the call for their chain and treat a revert
/// as a failed verification, not an error.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Call the verifier contract. Errors are treated as verification
    /// failure by the caller.
    async fn call_verifier(&self, call: &OnChainVerifyCall) -> Result<bool, ProverError>;
}

/// A groth16 proof re-encoded for the on-chain verifier.
///
/// The `b` coordinate pairs are swapped relative to the proof blob, as
/// the pairing-check convention requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainVerifyCall {
    /// The blueprint whose verifier contract is called.
    pub blueprint_id: uuid::Uuid,
    /// The `a` curve point.
    pub a: [String; 2],
    /// The `b` curve point, coordinate pairs swapped.
    pub b: [[String; 2]; 2],
    /// The `c` curve point.
    pub c: [String; 2],
    /// The flat public-signal array.
    pub public_signals: Vec<String>,
}
