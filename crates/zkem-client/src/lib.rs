//! # zkem-client -- Typed Registry Client
//!
//! Ergonomic, typed access to the proof registry's HTTP surface:
//!
//! - **Proofs**: submit a proving request, poll status, fetch the full
//!   record.
//! - **Blueprints**: read blueprint props and the compiled artifact
//!   links (chunked zkeys, witness wasm, verification key, Noir circuit
//!   and regex graphs), and report local-proof completions.
//! - **DKIM directory**: the archive of published DKIM keys per sender
//!   domain.
//!
//! All requests flow through one [`Transport`] that injects the API-key
//! header and a bearer token from the configured [`AuthProvider`]. A
//! `401 Unauthorized` triggers the provider's expiry callback before
//! the error propagates.

pub mod auth;
pub mod blueprints;
pub mod config;
pub mod dkim;
pub mod error;
pub mod http;
pub mod proofs;

pub use auth::{AuthProvider, StaticTokenProvider};
pub use config::RegistryConfig;
pub use dkim::DkimKeyDirectory;
pub use error::ClientError;
pub use http::Transport;
pub use proofs::{ProofRecord, SubmitProofRequest, SubmitProofResponse};

/// Top-level registry client. Holds sub-clients for each resource.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    proofs: proofs::ProofClient,
    blueprints: blueprints::BlueprintClient,
    dkim: dkim::DkimClient,
}

impl RegistryClient {
    /// Create a new registry client from configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, ClientError> {
        let transport = Transport::new(&config)?;
        Ok(Self {
            proofs: proofs::ProofClient::new(transport.clone()),
            blueprints: blueprints::BlueprintClient::new(transport.clone()),
            dkim: dkim::DkimClient::new(transport, config.dkim_archive_url),
        })
    }

    /// Access the proof resource client.
    pub fn proofs(&self) -> &proofs::ProofClient {
        &self.proofs
    }

    /// Access the blueprint resource client.
    pub fn blueprints(&self) -> &blueprints::BlueprintClient {
        &self.blueprints
    }

    /// Access the DKIM key directory client.
    pub fn dkim(&self) -> &dkim::DkimClient {
        &self.dkim
    }
}
