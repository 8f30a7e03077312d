//! # Proof Resource Client
//!
//! Submit a proving request, poll its status, fetch the full record.
//! Submission is fire-once: a failed POST propagates immediately with
//! no retry, while status polling is the caller's loop (the Proof
//! entity owns the backoff policy).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use zkem_core::{ProofStatus, ZkFramework};

use crate::error::ClientError;
use crate::http::Transport;

/// A proving request posted to the registry.
///
/// Circom blueprints embed the generated circuit input; SP1 blueprints
/// send the raw email and the backend generates its own input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProofRequest {
    /// The blueprint to prove against.
    pub blueprint_id: Uuid,
    /// The generated circuit input (Circom path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    /// The raw email (SP1 path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eml: Option<String>,
    /// External inputs by name, if the blueprint declares any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_inputs: Option<BTreeMap<String, String>>,
}

/// The registry's acknowledgment of a proving request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProofResponse {
    /// The assigned proof id.
    pub id: String,
    /// Initial status, `InProgress` on acceptance.
    pub status: ProofStatus,
}

/// A proof record as returned by the registry.
///
/// Result fields are absent while the proof is in progress; the
/// registry populates them all when the proof reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    /// The proof id.
    pub id: String,
    /// The blueprint this proof was generated against.
    pub blueprint_id: Uuid,
    /// Current status.
    pub status: ProofStatus,
    /// The backend that produced (or is producing) the proof.
    #[serde(default)]
    pub zk_framework: Option<ZkFramework>,
    /// The serialized circuit input, stored for audit.
    #[serde(default)]
    pub input: Option<serde_json::Value>,
    /// The backend-specific proof blob.
    #[serde(default)]
    pub proof_data: Option<serde_json::Value>,
    /// Raw public outputs, shaped per `zk_framework`.
    #[serde(default)]
    pub public_outputs: Option<serde_json::Value>,
    /// Decoded public data: regex name → revealed part strings.
    #[serde(default)]
    pub public_data: Option<BTreeMap<String, Vec<String>>>,
    /// External inputs the proof committed to, by name.
    #[serde(default)]
    pub external_inputs: Option<BTreeMap<String, String>>,
    /// When proving started.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When proving finished.
    #[serde(default)]
    pub proved_at: Option<DateTime<Utc>>,
}

/// Status-only response for the polling endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProofStatusResponse {
    status: ProofStatus,
}

/// Client for the proof resource.
#[derive(Debug, Clone)]
pub struct ProofClient {
    transport: Transport,
}

impl ProofClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Submit a proving request.
    ///
    /// Calls `POST {base}/proof`.
    pub async fn submit(
        &self,
        req: &SubmitProofRequest,
    ) -> Result<SubmitProofResponse, ClientError> {
        self.transport.post_json("proof", req).await
    }

    /// Fetch only the status of a proof.
    ///
    /// Calls `GET {base}/proof/{id}/status`.
    pub async fn status(&self, id: &str) -> Result<ProofStatus, ClientError> {
        let resp: ProofStatusResponse =
            self.transport.get_json(&format!("proof/{id}/status")).await?;
        Ok(resp.status)
    }

    /// Fetch the full proof record.
    ///
    /// Calls `GET {base}/proof/{id}`.
    pub async fn get(&self, id: &str) -> Result<ProofRecord, ClientError> {
        self.transport.get_json(&format!("proof/{id}")).await
    }
}
