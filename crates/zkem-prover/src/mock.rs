//! # Mock Proving and Verification Backends
//!
//! Deterministic, transparent stand-ins for the compiled proving
//! engines and verifiers. The mock Circom backend speaks the real
//! worker protocol; the mock Noir backend produces outputs in the real
//! offset layout. No zero-knowledge guarantees; development and
//! testing only.

use async_trait::async_trait;
use tokio::sync::mpsc;

use zkem_witness::{ExternalInputWithMax, NoirRegexInput};

use crate::backends::{
    ContractCaller, Groth16Verifier, NoirBackend, NoirProofBundle, OnChainVerifyCall, Sp1Verifier,
};
use crate::error::ProverError;
use crate::worker::{CircomProverBackend, ProverJob, WorkerEvent};

/// Mock [`CircomProverBackend`]: emits progress events and a scripted
/// result through the worker protocol.
#[derive(Debug, Clone)]
pub struct MockCircomProverBackend {
    /// The public signals the "proof" exposes.
    pub public_signals: Vec<String>,
}

#[async_trait]
impl CircomProverBackend for MockCircomProverBackend {
    async fn prove(&self, job: ProverJob, events: mpsc::Sender<WorkerEvent>) {
        let _ = events
            .send(WorkerEvent::Progress {
                message: format!(
                    "fetched {} zkey chunks and {}",
                    job.chunked_zkey_urls.len(),
                    job.wasm_url
                ),
            })
            .await;
        let _ = events
            .send(WorkerEvent::Progress {
                message: "witness generated".into(),
            })
            .await;
        let _ = events
            .send(WorkerEvent::Result {
                proof: serde_json::json!({
                    "piA": ["1", "2"],
                    "piB": [["3", "4"], ["5", "6"]],
                    "piC": ["7", "8"],
                    "protocol": "groth16",
                }),
                public_signals: serde_json::Value::from(
                    self.public_signals
                        .iter()
                        .map(|s| serde_json::Value::from(s.as_str()))
                        .collect::<Vec<_>>(),
                ),
            })
            .await;
    }
}

/// Mock [`NoirBackend`]: echoes scripted public outputs.
#[derive(Debug, Clone)]
pub struct MockNoirBackend {
    /// The hex-string public outputs the "proof" exposes.
    pub public_outputs: Vec<String>,
}

#[async_trait]
impl NoirBackend for MockNoirBackend {
    async fn execute(
        &self,
        circuit: &serde_json::Value,
        regex_inputs: &[NoirRegexInput],
        external_inputs: &[ExternalInputWithMax],
    ) -> Result<serde_json::Value, ProverError> {
        Ok(serde_json::json!({
            "circuit": circuit,
            "regexCount": regex_inputs.len(),
            "externalInputCount": external_inputs.len(),
        }))
    }

    async fn prove(&self, witness: &serde_json::Value) -> Result<NoirProofBundle, ProverError> {
        Ok(NoirProofBundle {
            proof: serde_json::json!({"scheme": "mock-noir", "witness": witness}),
            public_outputs: self.public_outputs.clone(),
        })
    }
}

/// Mock [`Groth16Verifier`] with a fixed verdict.
#[derive(Debug, Clone, Copy)]
pub struct MockGroth16Verifier {
    /// The verdict every call returns.
    pub verdict: bool,
}

#[async_trait]
impl Groth16Verifier for MockGroth16Verifier {
    async fn verify(
        &self,
        _vkey: &str,
        _proof_data: &serde_json::Value,
        _public_signals: &serde_json::Value,
    ) -> Result<bool, ProverError> {
        Ok(self.verdict)
    }
}

/// Mock [`Sp1Verifier`] with a fixed verdict.
#[derive(Debug, Clone, Copy)]
pub struct MockSp1Verifier {
    /// The verdict every call returns.
    pub verdict: bool,
}

#[async_trait]
impl Sp1Verifier for MockSp1Verifier {
    async fn verify(
        &self,
        _proof_data: &serde_json::Value,
        _public_outputs: &serde_json::Value,
    ) -> Result<bool, ProverError> {
        Ok(self.verdict)
    }
}

/// Mock [`ContractCaller`]: scripted verdict or revert.
#[derive(Debug, Clone)]
pub struct MockContractCaller {
    /// `Ok(verdict)` or a simulated revert message.
    pub outcome: Result<bool, String>,
}

#[async_trait]
impl ContractCaller for MockContractCaller {
    async fn call_verifier(&self, _call: &OnChainVerifyCall) -> Result<bool, ProverError> {
        match &self.outcome {
            Ok(verdict) => Ok(*verdict),
            Err(revert) => Err(ProverError::Backend(revert.clone())),
        }
    }
}
