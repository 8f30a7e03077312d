//! # Proving Worker Protocol
//!
//! Local groth16 proving runs in an isolated task that shares no state
//! with the dispatcher: one typed job in, a stream of typed events out,
//! exactly one terminal event. The isolation boundary keeps proving
//! computation restartable independently of the caller, even though the
//! runtime would permit shared memory.
//!
//! Protocol:
//!
//! - inbound: [`ProverJob`] `{ chunked_zkey_urls, inputs, wasm_url }`,
//!   sent once at spawn.
//! - outbound: [`WorkerEvent`], where `Progress` and `Message` are
//!   informational; `Result` and `Error` are terminal.
//!
//! The worker is torn down after the terminal event on both the success
//! and the error path.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::ProverError;

/// The job handed to a proving worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProverJob {
    /// Download links for the chunked groth16 proving key.
    pub chunked_zkey_urls: Vec<String>,
    /// The generated circuit input.
    pub inputs: serde_json::Value,
    /// Download link for the witness-generation wasm.
    pub wasm_url: String,
}

/// Events a proving worker emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum WorkerEvent {
    /// Progress through the proving pipeline (downloads, witness,
    /// proof).
    Progress {
        /// Human-readable progress description.
        message: String,
    },
    /// Informational message from the backend.
    Message {
        /// The message text.
        message: String,
    },
    /// Terminal success: the proof and its public signals.
    Result {
        /// The groth16 proof blob.
        proof: serde_json::Value,
        /// The flat public-signal array.
        public_signals: serde_json::Value,
    },
    /// Terminal failure.
    Error {
        /// The failure description.
        message: String,
    },
}

/// The proof and public signals a successful worker run produces.
#[derive(Debug, Clone)]
pub struct CircomProofBundle {
    /// The groth16 proof blob.
    pub proof: serde_json::Value,
    /// The flat public-signal array.
    pub public_signals: serde_json::Value,
}

/// The groth16 proving engine that runs inside the worker task.
///
/// Implementations download the chunked proving key and wasm, generate
/// the witness, compute the proof, and report through `events`:
/// informational events as work progresses and exactly one terminal
/// `Result` or `Error`. Returning without a terminal event is treated
/// as a worker fault by the dispatcher.
#[async_trait]
pub trait CircomProverBackend: Send + Sync {
    /// Run one proving job to completion, reporting through `events`.
    async fn prove(&self, job: ProverJob, events: mpsc::Sender<WorkerEvent>);
}

/// Spawn a worker for one job and consume its events until terminal.
///
/// One worker per call, no pooling: local proving is serialized per
/// prover instance. The worker task is aborted after the terminal
/// event, or when this future is dropped.
pub async fn run_prover_job(
    backend: Arc<dyn CircomProverBackend>,
    job: ProverJob,
) -> Result<CircomProofBundle, ProverError> {
    let (tx, mut rx) = mpsc::channel::<WorkerEvent>(16);
    let worker = tokio::spawn(async move { backend.prove(job, tx).await });

    let outcome = loop {
        match rx.recv().await {
            Some(WorkerEvent::Progress { message }) => {
                tracing::debug!(%message, "prover progress");
            }
            Some(WorkerEvent::Message { message }) => {
                tracing::debug!(%message, "prover message");
            }
            Some(WorkerEvent::Result {
                proof,
                public_signals,
            }) => {
                break Ok(CircomProofBundle {
                    proof,
                    public_signals,
                });
            }
            Some(WorkerEvent::Error { message }) => {
                tracing::error!(%message, "prover worker failed");
                break Err(ProverError::Worker(message));
            }
            None => {
                break Err(ProverError::Worker(
                    "worker ended without a terminal event".into(),
                ));
            }
        }
    };

    // Teardown on both paths; a worker that already returned is a no-op.
    worker.abort();
    outcome
}
