//! # The Proof Entity
//!
//! A [`Proof`] represents one in-flight or completed proof. Remote
//! proofs are born `InProgress` and polled to a terminal state; local
//! proofs are born `Done` because local proving completes synchronously
//! before the entity exists.
//!
//! ## Terminal-state contract
//!
//! Once a proof is `Done` or `Failed` its fields never change again and
//! [`Proof::check_status`] answers from cache without a network call.
//! When a status poll observes a transition, the entity refetches the
//! whole record and replaces its props in a single assignment, so a
//! reader can never observe a terminal status paired with stale
//! in-progress result fields.
//!
//! ## Polling contract
//!
//! Polls are strictly sequential: the backoff wait is computed and
//! honored before the next request fires, so overlapping status
//! requests cannot be issued from one entity. Callers that poll from
//! several tasks must serialize access themselves.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use zkem_client::{ProofRecord, RegistryClient};
use zkem_core::{BlueprintProps, ConfigError, ProofStatus, ZkFramework};

use crate::backoff::backoff_delay;
use crate::error::ProverError;

/// The serializable state of a proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofProps {
    /// Proof id: registry-assigned for remote proofs, locally generated
    /// for local proofs.
    pub id: String,
    /// The blueprint this proof was generated against.
    pub blueprint_id: Uuid,
    /// Current status.
    pub status: ProofStatus,
    /// The backend that produced the proof. May differ between proofs
    /// of the same blueprint (client vs server framework).
    #[serde(default)]
    pub zk_framework: Option<ZkFramework>,
    /// The serialized circuit input, stored for audit and debugging.
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
    pub public_data: BTreeMap<String, Vec<String>>,
    /// External inputs the proof committed to, by name.
    #[serde(default)]
    pub external_inputs: BTreeMap<String, String>,
    /// When proving started.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When proving finished.
    #[serde(default)]
    pub proved_at: Option<DateTime<Utc>>,
    /// Whether the proof was produced in this process.
    #[serde(default)]
    pub is_local: bool,
}

impl From<ProofRecord> for ProofProps {
    fn from(record: ProofRecord) -> Self {
        Self {
            id: record.id,
            blueprint_id: record.blueprint_id,
            status: record.status,
            zk_framework: record.zk_framework,
            input: record.input,
            proof_data: record.proof_data,
            public_outputs: record.public_outputs,
            public_data: record.public_data.unwrap_or_default(),
            external_inputs: record.external_inputs.unwrap_or_default(),
            started_at: record.started_at,
            proved_at: record.proved_at,
            is_local: false,
        }
    }
}

/// The artifacts a local proving run hands to [`Proof::from_local_run`].
#[derive(Debug, Clone)]
pub struct LocalProofArtifacts {
    /// The backend that produced the proof.
    pub zk_framework: ZkFramework,
    /// The proof blob.
    pub proof_data: serde_json::Value,
    /// Raw public outputs.
    pub public_outputs: serde_json::Value,
    /// Decoded public data.
    pub public_data: BTreeMap<String, Vec<String>>,
    /// External inputs committed to.
    pub external_inputs: BTreeMap<String, String>,
    /// The serialized circuit input.
    pub input: Option<serde_json::Value>,
    /// When proving started.
    pub started_at: DateTime<Utc>,
}

/// Sequential polling state. Not serialized; resets on unpack.
#[derive(Debug, Default)]
struct PollState {
    attempts: u32,
    last_checked: Option<Instant>,
}

/// An in-flight or completed proof. See the module docs for the
/// terminal-state and polling contracts.
#[derive(Debug)]
pub struct Proof {
    props: ProofProps,
    blueprint: Arc<BlueprintProps>,
    client: RegistryClient,
    poll: PollState,
}

impl Proof {
    /// Construct a proof from a remote record (a submission
    /// acknowledgment or a fetched snapshot).
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingProofId`] if the record carries no id.
    pub fn from_remote(
        client: RegistryClient,
        blueprint: Arc<BlueprintProps>,
        record: ProofRecord,
    ) -> Result<Self, ProverError> {
        if record.id.is_empty() {
            return Err(ConfigError::MissingProofId.into());
        }
        Ok(Self {
            props: record.into(),
            blueprint,
            client,
            poll: PollState::default(),
        })
    }

    /// Construct a proof from a completed local proving run. The entity
    /// is born `Done` with a locally generated id.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingProofData`] if the proof blob is JSON
    /// `null`; a local proof cannot exist without its data.
    pub fn from_local_run(
        client: RegistryClient,
        blueprint: Arc<BlueprintProps>,
        artifacts: LocalProofArtifacts,
    ) -> Result<Self, ProverError> {
        if artifacts.proof_data.is_null() {
            return Err(ConfigError::MissingProofData.into());
        }
        let props = ProofProps {
            id: Uuid::new_v4().to_string(),
            blueprint_id: blueprint.id,
            status: ProofStatus::Done,
            zk_framework: Some(artifacts.zk_framework),
            input: artifacts.input,
            proof_data: Some(artifacts.proof_data),
            public_outputs: Some(artifacts.public_outputs),
            public_data: artifacts.public_data,
            external_inputs: artifacts.external_inputs,
            started_at: Some(artifacts.started_at),
            proved_at: Some(Utc::now()),
            is_local: true,
        };
        Ok(Self {
            props,
            blueprint,
            client,
            poll: PollState::default(),
        })
    }

    /// Fetch a proof record by id and wrap it.
    pub async fn fetch(
        client: RegistryClient,
        blueprint: Arc<BlueprintProps>,
        id: &str,
    ) -> Result<Self, ProverError> {
        let record = client.proofs().get(id).await?;
        Self::from_remote(client, blueprint, record)
    }

    /// The proof id.
    pub fn id(&self) -> &str {
        &self.props.id
    }

    /// The proof's current props snapshot.
    pub fn props(&self) -> &ProofProps {
        &self.props
    }

    /// The blueprint this proof is attached to.
    pub fn blueprint(&self) -> &BlueprintProps {
        &self.blueprint
    }

    /// The current status without any network activity.
    pub fn status(&self) -> ProofStatus {
        self.props.status
    }

    /// Poll the proof's status once, honoring the backoff schedule.
    ///
    /// Terminal states are cached forever: once `Done` or `Failed`, no
    /// network request is issued. Otherwise the call waits out the
    /// backoff window remaining since the previous poll, fetches the
    /// status, and, when it observes a transition, refetches the full
    /// record and replaces all props atomically.
    pub async fn check_status(&mut self) -> Result<ProofStatus, ProverError> {
        if self.props.status.is_terminal() {
            return Ok(self.props.status);
        }

        // The first poll never waits; later polls wait out whatever is
        // left of the backoff window since the previous poll.
        if let Some(last) = self.poll.last_checked {
            let window = backoff_delay(self.poll.attempts);
            let elapsed = last.elapsed();
            if elapsed < window {
                tokio::time::sleep(window - elapsed).await;
            }
            self.poll.attempts += 1;
        }
        self.poll.last_checked = Some(Instant::now());

        let previous = self.props.status;
        let status = self.client.proofs().status(&self.props.id).await?;

        if status != previous && !previous.is_terminal() {
            // Transition observed: refetch the whole record so result
            // fields land together with the new status.
            let record = self.client.proofs().get(&self.props.id).await?;
            let is_local = self.props.is_local;
            let mut props = ProofProps::from(record);
            props.is_local = is_local;
            self.props = props;
        }

        Ok(self.props.status)
    }

    /// Poll until the status is no longer `InProgress` and return the
    /// final status.
    ///
    /// Bounded only by backend completion; callers needing a timeout
    /// wrap this externally or use
    /// [`wait_for_completion_with`](Self::wait_for_completion_with).
    pub async fn wait_for_completion(&mut self) -> Result<ProofStatus, ProverError> {
        loop {
            let status = self.check_status().await?;
            if status != ProofStatus::InProgress {
                return Ok(status);
            }
        }
    }

    /// [`wait_for_completion`](Self::wait_for_completion) with a
    /// cancellation hook. Returns `Ok(None)` when `cancel` flips to
    /// `true` before the proof reaches a terminal state.
    pub async fn wait_for_completion_with(
        &mut self,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<Option<ProofStatus>, ProverError> {
        loop {
            if *cancel.borrow() {
                return Ok(None);
            }
            tokio::select! {
                status = self.check_status() => {
                    let status = status?;
                    if status != ProofStatus::InProgress {
                        return Ok(Some(status));
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Verify this proof: the DKIM identity gate, then cryptographic
    /// verification. Delegates to
    /// [`ProofVerifier::verify`](crate::verifier::ProofVerifier::verify).
    pub async fn verify(
        &self,
        verifier: &crate::verifier::ProofVerifier,
    ) -> Result<bool, ProverError> {
        verifier.verify(self).await
    }

    /// The proof blob of a completed proof.
    ///
    /// # Errors
    ///
    /// [`ProverError::NotDone`] unless the status is `Done`; partial
    /// results from an in-progress proof are never exposed.
    pub fn proof_data(&self) -> Result<&serde_json::Value, ProverError> {
        if self.props.status != ProofStatus::Done {
            return Err(ProverError::NotDone {
                id: self.props.id.clone(),
                status: self.props.status,
            });
        }
        self.props.proof_data.as_ref().ok_or_else(|| {
            ProverError::MalformedProofData("status is Done but proofData is absent".into())
        })
    }

    /// Serialize the proof's props as a transportable string.
    pub fn pack_proof(&self) -> Result<String, ProverError> {
        Ok(serde_json::to_string(&self.props)?)
    }

    /// Reconstruct a proof from a packed string.
    ///
    /// # Errors
    ///
    /// [`ProverError::MissingBlueprintId`] if the packed payload lacks
    /// its blueprint binding.
    pub fn unpack_proof(
        client: RegistryClient,
        blueprint: Arc<BlueprintProps>,
        packed: &str,
    ) -> Result<Self, ProverError> {
        let value: serde_json::Value = serde_json::from_str(packed)?;
        if value.get("blueprintId").is_none() {
            return Err(ProverError::MissingBlueprintId);
        }
        let props: ProofProps = serde_json::from_value(value)?;
        Ok(Self {
            props,
            blueprint,
            client,
            poll: PollState::default(),
        })
    }
}
