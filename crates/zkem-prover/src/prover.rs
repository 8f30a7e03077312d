//! # Prover Dispatcher
//!
//! One entry point, two execution paths. [`Prover::generate_proof`]
//! branches on the configured mode:
//!
//! - **Local**: generate circuit inputs, run the proving engine in this
//!   process (Circom through the isolated worker, Noir in-process via
//!   the injected handle), decode the public outputs, and return a
//!   `Done` proof. Completion reports a local-proof count increment to
//!   the registry as fire-and-forget.
//! - **Remote**: post the proving request, wait an initial delay, then
//!   drive the status machine to a terminal state. `Failed` surfaces as
//!   an error; `Done` returns the completed proof.
//!
//! Mode/framework mismatches fail before any network or worker
//! activity.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use zkem_client::{ProofRecord, RegistryClient, SubmitProofRequest};
use zkem_core::{
    BlueprintProps, ConfigError, ExternalInputValue, ProofStatus, ZkFramework,
};
use zkem_witness::{
    generate_noir_proof_inputs, generate_proof_inputs, CircuitInputBuilder, EmailParser,
};

use crate::backends::NoirBackend;
use crate::error::ProverError;
use crate::proof::{LocalProofArtifacts, Proof};
use crate::worker::{run_prover_job, CircomProverBackend, ProverJob};

/// Delay between remote submission and the first status poll.
const INITIAL_POLL_DELAY: Duration = Duration::from_secs(6);

/// Construction options for a [`Prover`].
///
/// The engine handles follow an init-once lifecycle: initialize them at
/// process start and share them across provers.
#[derive(Clone)]
pub struct ProverOptions {
    /// Whether proofs are generated locally or by the registry backend.
    pub is_local: bool,
    /// The groth16 worker engine, required for local Circom proving.
    pub circom_backend: Option<Arc<dyn CircomProverBackend>>,
    /// The in-process Noir engine, required for local Noir proving.
    pub noir_backend: Option<Arc<dyn NoirBackend>>,
    /// Delay before the first remote status poll.
    pub initial_poll_delay: Duration,
}

impl Default for ProverOptions {
    fn default() -> Self {
        Self {
            is_local: false,
            circom_backend: None,
            noir_backend: None,
            initial_poll_delay: INITIAL_POLL_DELAY,
        }
    }
}

impl std::fmt::Debug for ProverOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProverOptions")
            .field("is_local", &self.is_local)
            .field("circom_backend", &self.circom_backend.as_ref().map(|_| "<engine>"))
            .field("noir_backend", &self.noir_backend.as_ref().map(|_| "<engine>"))
            .field("initial_poll_delay", &self.initial_poll_delay)
            .finish()
    }
}

/// Generates proofs against one blueprint.
pub struct Prover {
    client: RegistryClient,
    blueprint: Arc<BlueprintProps>,
    parser: Arc<dyn EmailParser>,
    input_builder: Arc<dyn CircuitInputBuilder>,
    options: ProverOptions,
}

impl Prover {
    /// Create a prover for a blueprint.
    pub fn new(
        client: RegistryClient,
        blueprint: Arc<BlueprintProps>,
        parser: Arc<dyn EmailParser>,
        input_builder: Arc<dyn CircuitInputBuilder>,
        options: ProverOptions,
    ) -> Self {
        Self {
            client,
            blueprint,
            parser,
            input_builder,
            options,
        }
    }

    /// Generate a proof for `eml`, locally or remotely per the
    /// configured mode.
    pub async fn generate_proof(
        &self,
        eml: &str,
        external_inputs: &[ExternalInputValue],
    ) -> Result<Proof, ProverError> {
        if self.options.is_local {
            self.generate_local_proof(eml, external_inputs).await
        } else {
            self.generate_remote_proof(eml, external_inputs).await
        }
    }

    /// Generate a proof in this process.
    ///
    /// Fails fast, before any network or worker activity, when the
    /// blueprint has no client-side framework or the framework's engine
    /// handle is missing.
    pub async fn generate_local_proof(
        &self,
        eml: &str,
        external_inputs: &[ExternalInputValue],
    ) -> Result<Proof, ProverError> {
        let framework = self.blueprint.client_framework()?;
        match framework {
            ZkFramework::Circom => {
                let engine = self
                    .options
                    .circom_backend
                    .clone()
                    .ok_or(ConfigError::MissingCircomBackend)?;
                self.local_circom(engine, eml, external_inputs).await
            }
            ZkFramework::Noir => {
                let engine = self
                    .options
                    .noir_backend
                    .clone()
                    .ok_or(ConfigError::MissingNoirBackend)?;
                self.local_noir(engine, eml, external_inputs).await
            }
            ZkFramework::Sp1 => Err(ConfigError::UnsupportedPath {
                framework,
                path: "local",
            }
            .into()),
        }
    }

    async fn local_circom(
        &self,
        engine: Arc<dyn CircomProverBackend>,
        eml: &str,
        external_inputs: &[ExternalInputValue],
    ) -> Result<Proof, ProverError> {
        let started_at = Utc::now();
        let inputs = generate_proof_inputs(
            self.parser.as_ref(),
            self.input_builder.as_ref(),
            eml,
            &self.blueprint,
            external_inputs,
        )?;

        // Artifact links are independent; fetch them concurrently.
        let (zkey_urls, wasm_url) = tokio::try_join!(
            self.client.blueprints().chunked_zkey_urls(self.blueprint.id),
            self.client.blueprints().wasm_url(self.blueprint.id),
        )?;

        let bundle = run_prover_job(
            engine,
            ProverJob {
                chunked_zkey_urls: zkey_urls,
                inputs: inputs.clone(),
                wasm_url,
            },
        )
        .await?;

        let public_data = zkem_codec::decode_public_outputs(
            ZkFramework::Circom,
            &bundle.public_signals,
            &self.blueprint,
        )?;

        let proof = Proof::from_local_run(
            self.client.clone(),
            self.blueprint.clone(),
            LocalProofArtifacts {
                zk_framework: ZkFramework::Circom,
                proof_data: bundle.proof,
                public_outputs: bundle.public_signals,
                public_data,
                external_inputs: to_map(external_inputs),
                input: Some(inputs),
                started_at,
            },
        )?;
        self.report_local_proof();
        Ok(proof)
    }

    async fn local_noir(
        &self,
        engine: Arc<dyn NoirBackend>,
        eml: &str,
        external_inputs: &[ExternalInputValue],
    ) -> Result<Proof, ProverError> {
        let started_at = Utc::now();

        let (circuit, graphs) = tokio::try_join!(
            self.client.blueprints().noir_circuit(self.blueprint.id),
            self.client.blueprints().noir_regex_graphs(self.blueprint.id),
        )?;

        let (regex_inputs, joined_externals) = generate_noir_proof_inputs(
            self.parser.as_ref(),
            eml,
            &self.blueprint,
            external_inputs,
            &graphs,
        )?;

        let witness = engine
            .execute(&circuit, &regex_inputs, &joined_externals)
            .await?;
        let bundle = engine.prove(&witness).await?;

        let outputs = serde_json::Value::from(
            bundle
                .public_outputs
                .iter()
                .map(|s| serde_json::Value::from(s.as_str()))
                .collect::<Vec<_>>(),
        );
        let public_data =
            zkem_codec::decode_public_outputs(ZkFramework::Noir, &outputs, &self.blueprint)?;

        let proof = Proof::from_local_run(
            self.client.clone(),
            self.blueprint.clone(),
            LocalProofArtifacts {
                zk_framework: ZkFramework::Noir,
                proof_data: bundle.proof,
                public_outputs: outputs,
                public_data,
                external_inputs: to_map(external_inputs),
                input: Some(witness),
                started_at,
            },
        )?;
        self.report_local_proof();
        Ok(proof)
    }

    /// Report one completed local proof, without blocking or failing
    /// the caller.
    fn report_local_proof(&self) {
        let client = self.client.clone();
        let blueprint_id = self.blueprint.id;
        tokio::spawn(async move {
            if let Err(e) = client
                .blueprints()
                .increment_local_proof_count(blueprint_id)
                .await
            {
                tracing::warn!(%blueprint_id, error = %e, "local proof count increment failed");
            }
        });
    }

    /// Generate a proof on the registry backend and poll it to a
    /// terminal state.
    pub async fn generate_remote_proof(
        &self,
        eml: &str,
        external_inputs: &[ExternalInputValue],
    ) -> Result<Proof, ProverError> {
        let framework = self.blueprint.server_framework()?;

        let request = match framework {
            ZkFramework::Circom => {
                let inputs = generate_proof_inputs(
                    self.parser.as_ref(),
                    self.input_builder.as_ref(),
                    eml,
                    &self.blueprint,
                    external_inputs,
                )?;
                SubmitProofRequest {
                    blueprint_id: self.blueprint.id,
                    input: Some(inputs),
                    eml: None,
                    external_inputs: some_map(external_inputs),
                }
            }
            ZkFramework::Sp1 => {
                // The backend generates its own input from the raw
                // email, but missing external inputs still fail here,
                // before the request is sent.
                zkem_witness::add_max_length_to_external_inputs(
                    self.blueprint.external_inputs(),
                    external_inputs,
                )?;
                SubmitProofRequest {
                    blueprint_id: self.blueprint.id,
                    input: None,
                    eml: Some(eml.to_string()),
                    external_inputs: some_map(external_inputs),
                }
            }
            ZkFramework::Noir => Err(ConfigError::UnsupportedPath {
                framework,
                path: "remote",
            })?,
        };

        let ack = self.client.proofs().submit(&request).await?;
        tracing::debug!(proof_id = %ack.id, "remote proving accepted");

        let record = ProofRecord {
            id: ack.id,
            blueprint_id: self.blueprint.id,
            status: ack.status,
            zk_framework: Some(framework),
            input: request.input.clone(),
            proof_data: None,
            public_outputs: None,
            public_data: None,
            external_inputs: some_map(external_inputs),
            started_at: Some(Utc::now()),
            proved_at: None,
        };
        let mut proof = Proof::from_remote(self.client.clone(), self.blueprint.clone(), record)?;

        tokio::time::sleep(self.options.initial_poll_delay).await;
        let status = proof.wait_for_completion().await?;
        if status == ProofStatus::Failed {
            return Err(ProverError::RemoteJobFailed {
                id: proof.id().to_string(),
            });
        }
        Ok(proof)
    }
}

fn to_map(external_inputs: &[ExternalInputValue]) -> BTreeMap<String, String> {
    external_inputs
        .iter()
        .map(|v| (v.name.clone(), v.value.clone()))
        .collect()
}

fn some_map(external_inputs: &[ExternalInputValue]) -> Option<BTreeMap<String, String>> {
    if external_inputs.is_empty() {
        None
    } else {
        Some(to_map(external_inputs))
    }
}
