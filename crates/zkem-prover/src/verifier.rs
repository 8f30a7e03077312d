//! # Proof Verification
//!
//! Two-stage verification. First the identity gate: the proof's
//! committed pubkey hash must match a key the sender domain actually
//! published, recomputed with the framework's hash family (Poseidon
//! over the chunked RSA modulus for Circom and Noir, SHA-256 over the
//! DER key for SP1). Only when a key matches does cryptographic
//! verification run. A failed check returns `false`; errors are
//! reserved for structural problems (mismatched blueprint, missing
//! outputs).
//!
//! On-chain verification is a separate explicit path that re-encodes
//! the groth16 coordinates for the verifier contract and treats a
//! revert as a failed verification.

use std::sync::Arc;

use zkem_client::{DkimKeyDirectory, RegistryClient};
use zkem_codec::extract_pubkey_hash;
use zkem_core::ZkFramework;
use zkem_crypto::{sha256_pubkey_hash, PoseidonKeyHasher};

use crate::backends::{ContractCaller, Groth16Verifier, OnChainVerifyCall, Sp1Verifier};
use crate::error::ProverError;
use crate::proof::Proof;

/// Verifies completed proofs.
pub struct ProofVerifier {
    client: RegistryClient,
    dkim: Arc<dyn DkimKeyDirectory>,
    key_hasher: Arc<dyn PoseidonKeyHasher>,
    groth16: Option<Arc<dyn Groth16Verifier>>,
    sp1: Option<Arc<dyn Sp1Verifier>>,
}

impl ProofVerifier {
    /// Create a verifier. Cryptographic backends are attached with
    /// [`with_groth16`](Self::with_groth16) and
    /// [`with_sp1`](Self::with_sp1); a framework without its backend
    /// verifies as `false` with a warning.
    pub fn new(
        client: RegistryClient,
        dkim: Arc<dyn DkimKeyDirectory>,
        key_hasher: Arc<dyn PoseidonKeyHasher>,
    ) -> Self {
        Self {
            client,
            dkim,
            key_hasher,
            groth16: None,
            sp1: None,
        }
    }

    /// Attach the groth16 verification backend.
    pub fn with_groth16(mut self, verifier: Arc<dyn Groth16Verifier>) -> Self {
        self.groth16 = Some(verifier);
        self
    }

    /// Attach the SP1 verification backend.
    pub fn with_sp1(mut self, verifier: Arc<dyn Sp1Verifier>) -> Self {
        self.sp1 = Some(verifier);
        self
    }

    /// Verify a proof: identity gate first, then cryptographic
    /// verification.
    pub async fn verify(&self, proof: &Proof) -> Result<bool, ProverError> {
        let props = proof.props();
        let blueprint = proof.blueprint();

        if props.blueprint_id != blueprint.id {
            return Err(ProverError::BlueprintMismatch {
                proof: props.blueprint_id,
                blueprint: blueprint.id,
            });
        }

        let outputs = props
            .public_outputs
            .as_ref()
            .ok_or_else(|| ProverError::MissingPublicOutputs(props.id.clone()))?;
        let framework = props
            .zk_framework
            .ok_or_else(|| ProverError::MissingFramework(props.id.clone()))?;

        let committed = extract_pubkey_hash(framework, outputs)?;
        let domain = blueprint
            .sender_domain
            .as_deref()
            .ok_or(ProverError::MissingSenderDomain(blueprint.id))?;

        if !self.pubkey_matches(framework, domain, &committed).await? {
            tracing::debug!(
                proof_id = %props.id,
                %domain,
                "committed pubkey hash matches no published DKIM key"
            );
            return Ok(false);
        }

        match framework {
            ZkFramework::Circom => {
                let Some(groth16) = &self.groth16 else {
                    tracing::warn!(proof_id = %props.id, "no groth16 verifier attached");
                    return Ok(false);
                };
                let proof_data = props.proof_data.as_ref().ok_or_else(|| {
                    ProverError::MalformedProofData("proof carries no proofData".into())
                })?;
                let vkey = self.client.blueprints().vkey(blueprint.id).await?;
                groth16.verify(&vkey, proof_data, outputs).await
            }
            ZkFramework::Sp1 => {
                let Some(sp1) = &self.sp1 else {
                    tracing::warn!(proof_id = %props.id, "no sp1 verifier attached");
                    return Ok(false);
                };
                let proof_data = props.proof_data.as_ref().ok_or_else(|| {
                    ProverError::MalformedProofData("proof carries no proofData".into())
                })?;
                sp1.verify(proof_data, outputs).await
            }
            ZkFramework::Noir => {
                tracing::warn!(
                    proof_id = %props.id,
                    "noir proofs have no off-chain verifier; returning false"
                );
                Ok(false)
            }
        }
    }

    /// Whether any key the domain published hashes to the committed
    /// value under the framework's hash family.
    async fn pubkey_matches(
        &self,
        framework: ZkFramework,
        domain: &str,
        committed: &[u8; 32],
    ) -> Result<bool, ProverError> {
        let keys = self.dkim.fetch_keys(domain).await?;
        for key in keys {
            let der = match key.der_bytes() {
                Ok(der) => der,
                Err(e) => {
                    tracing::warn!(selector = %key.selector, error = %e, "skipping undecodable DKIM key");
                    continue;
                }
            };
            let matches = match framework {
                ZkFramework::Circom | ZkFramework::Noir => {
                    if !key.is_rsa() {
                        continue;
                    }
                    match self.key_hasher.hash_rsa_der(&der) {
                        Ok(hash) => hash.as_bytes() == committed,
                        Err(e) => {
                            tracing::warn!(selector = %key.selector, error = %e, "poseidon key hash failed");
                            continue;
                        }
                    }
                }
                ZkFramework::Sp1 => sha256_pubkey_hash(&der).as_bytes() == committed,
            };
            if matches {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Verify a groth16 proof through the on-chain verifier contract.
    ///
    /// Any revert or call failure is a failed verification, not an
    /// error.
    pub async fn verify_on_chain(
        &self,
        proof: &Proof,
        caller: &dyn ContractCaller,
    ) -> Result<bool, ProverError> {
        let call = encode_on_chain_call(proof)?;
        match caller.call_verifier(&call).await {
            Ok(verdict) => Ok(verdict),
            Err(e) => {
                tracing::warn!(proof_id = %proof.id(), error = %e, "verifier contract call reverted");
                Ok(false)
            }
        }
    }
}

/// Re-encode a proof's groth16 coordinates as a verifier contract call.
///
/// The `b` point's coordinate pairs are swapped, as the pairing-check
/// convention requires.
pub fn encode_on_chain_call(proof: &Proof) -> Result<OnChainVerifyCall, ProverError> {
    let proof_data = proof.proof_data()?;
    let outputs = proof
        .props()
        .public_outputs
        .as_ref()
        .ok_or_else(|| ProverError::MissingPublicOutputs(proof.id().to_string()))?;

    let a = coord_pair(proof_data, "piA")?;
    let b_rows = proof_data
        .get("piB")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProverError::MalformedProofData("piB is not an array".into()))?;
    if b_rows.len() < 2 {
        return Err(ProverError::MalformedProofData(
            "piB needs two coordinate pairs".into(),
        ));
    }
    let b0 = pair_from(&b_rows[0], "piB[0]")?;
    let b1 = pair_from(&b_rows[1], "piB[1]")?;
    let c = coord_pair(proof_data, "piC")?;

    let public_signals = outputs
        .as_array()
        .ok_or_else(|| {
            ProverError::MalformedProofData("public outputs are not a signal array".into())
        })?
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                ProverError::MalformedProofData("public signal is not a string".into())
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OnChainVerifyCall {
        blueprint_id: proof.props().blueprint_id,
        a,
        // Coordinate swap within each pair of b.
        b: [[b0[1].clone(), b0[0].clone()], [b1[1].clone(), b1[0].clone()]],
        c,
        public_signals,
    })
}

fn coord_pair(proof_data: &serde_json::Value, key: &str) -> Result<[String; 2], ProverError> {
    let value = proof_data
        .get(key)
        .ok_or_else(|| ProverError::MalformedProofData(format!("{key} is missing")))?;
    pair_from(value, key)
}

fn pair_from(value: &serde_json::Value, context: &str) -> Result<[String; 2], ProverError> {
    let array = value
        .as_array()
        .ok_or_else(|| ProverError::MalformedProofData(format!("{context} is not an array")))?;
    let mut coords = array.iter().filter_map(|v| v.as_str());
    match (coords.next(), coords.next()) {
        (Some(x), Some(y)) => Ok([x.to_string(), y.to_string()]),
        _ => Err(ProverError::MalformedProofData(format!(
            "{context} needs two string coordinates"
        ))),
    }
}
