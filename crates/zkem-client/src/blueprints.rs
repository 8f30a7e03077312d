//! # Blueprint Resource Client
//!
//! Read-only access to blueprint props and the compiled artifacts the
//! proving pipeline downloads: chunked proving keys, the witness wasm,
//! the verification key, and the Noir circuit with its precompiled
//! regex graphs. Blueprint authoring (create/update/compile) is a
//! registry-side workflow outside this SDK.

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use zkem_core::BlueprintProps;

use crate::error::ClientError;
use crate::http::Transport;

/// Download links for the chunked groth16 proving key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChunkedZkeyResponse {
    urls: Vec<String>,
}

/// Download link for a single artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactUrlResponse {
    url: String,
}

/// Verification key payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VkeyResponse {
    vkey: String,
}

/// Client for the blueprint resource.
#[derive(Debug, Clone)]
pub struct BlueprintClient {
    transport: Transport,
}

impl BlueprintClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch blueprint props by id.
    ///
    /// Calls `GET {base}/blueprint/{id}`.
    pub async fn get(&self, id: Uuid) -> Result<BlueprintProps, ClientError> {
        self.transport.get_json(&format!("blueprint/{id}")).await
    }

    /// Fetch the download links for the chunked groth16 proving key.
    ///
    /// Calls `GET {base}/blueprint/{id}/chunked-zkey-urls`.
    pub async fn chunked_zkey_urls(&self, id: Uuid) -> Result<Vec<String>, ClientError> {
        let resp: ChunkedZkeyResponse = self
            .transport
            .get_json(&format!("blueprint/{id}/chunked-zkey-urls"))
            .await?;
        Ok(resp.urls)
    }

    /// Fetch the download link for the witness-generation wasm.
    ///
    /// Calls `GET {base}/blueprint/{id}/wasm-url`.
    pub async fn wasm_url(&self, id: Uuid) -> Result<String, ClientError> {
        let resp: ArtifactUrlResponse = self
            .transport
            .get_json(&format!("blueprint/{id}/wasm-url"))
            .await?;
        Ok(resp.url)
    }

    /// Fetch the groth16 verification key.
    ///
    /// Calls `GET {base}/blueprint/{id}/vkey`.
    pub async fn vkey(&self, id: Uuid) -> Result<String, ClientError> {
        let resp: VkeyResponse = self
            .transport
            .get_json(&format!("blueprint/{id}/vkey"))
            .await?;
        Ok(resp.vkey)
    }

    /// Fetch the compiled Noir circuit, kept opaque.
    ///
    /// Calls `GET {base}/blueprint/{id}/noir-circuit`.
    pub async fn noir_circuit(&self, id: Uuid) -> Result<serde_json::Value, ClientError> {
        self.transport
            .get_json(&format!("blueprint/{id}/noir-circuit"))
            .await
    }

    /// Fetch the precompiled Noir regex graphs, keyed by
    /// decomposed-regex name.
    ///
    /// Calls `GET {base}/blueprint/{id}/noir-regex-graphs`.
    pub async fn noir_regex_graphs(
        &self,
        id: Uuid,
    ) -> Result<BTreeMap<String, serde_json::Value>, ClientError> {
        self.transport
            .get_json(&format!("blueprint/{id}/noir-regex-graphs"))
            .await
    }

    /// Report one completed local proof for accounting.
    ///
    /// Calls `POST {base}/blueprint/{id}/local-proofs`. Callers treat
    /// this as fire-and-forget; a failure here never fails a proof.
    pub async fn increment_local_proof_count(&self, id: Uuid) -> Result<(), ClientError> {
        self.transport
            .post_unit(&format!("blueprint/{id}/local-proofs"), &serde_json::json!({}))
            .await
    }
}
