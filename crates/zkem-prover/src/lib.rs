//! # zkem-prover -- Proof Lifecycle Engine
//!
//! The core of the SDK: the [`Proof`] entity with its status state
//! machine, the [`Prover`] dispatcher over the local and remote
//! execution paths, the isolated proving worker protocol, and the
//! [`ProofVerifier`].
//!
//! ## Architecture
//!
//! - **Proof** (`proof.rs`): status transitions, backoff polling,
//!   atomic terminal refresh, pack/unpack.
//! - **Prover** (`prover.rs`): local worker pipeline (Circom), local
//!   in-process pipeline (Noir), remote submit-and-poll pipeline.
//! - **Worker** (`worker.rs`): the message-passing protocol that keeps
//!   groth16 proving isolated from the dispatcher.
//! - **Backends** (`backends.rs`): the injected engine and verifier
//!   seams; `mock.rs` provides deterministic stand-ins.
//! - **Verifier** (`verifier.rs`): DKIM identity gate, cryptographic
//!   verification, on-chain call encoding.

pub mod backends;
pub mod backoff;
pub mod error;
pub mod mock;
pub mod proof;
pub mod prover;
pub mod verifier;
pub mod worker;

pub use backends::{
    ContractCaller, Groth16Verifier, NoirBackend, NoirProofBundle, OnChainVerifyCall, Sp1Verifier,
};
pub use error::ProverError;
pub use proof::{LocalProofArtifacts, Proof, ProofProps};
pub use prover::{Prover, ProverOptions};
pub use verifier::{encode_on_chain_call, ProofVerifier};
pub use worker::{CircomProofBundle, CircomProverBackend, ProverJob, WorkerEvent};
