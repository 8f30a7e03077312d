//! # DKIM Key Directory Client
//!
//! Looks up the DKIM keys a sender domain has published, from the
//! public key archive. Verification recomputes a key-hash commitment
//! for each candidate until one matches the proof's committed hash.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use zkem_crypto::DkimKey;

use crate::error::ClientError;
use crate::http::Transport;

/// Directory of published DKIM keys, queried by sender domain.
#[async_trait]
pub trait DkimKeyDirectory: Send + Sync {
    /// All keys the domain has published, newest first.
    async fn fetch_keys(&self, domain: &str) -> Result<Vec<DkimKey>, ClientError>;
}

/// One archive entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArchiveEntry {
    selector: String,
    #[serde(default)]
    key_type: Option<String>,
    value: String,
}

/// HTTP client for the DKIM key archive.
#[derive(Debug, Clone)]
pub struct DkimClient {
    transport: Transport,
    archive_url: Url,
}

impl DkimClient {
    pub(crate) fn new(transport: Transport, archive_url: Url) -> Self {
        Self {
            transport,
            archive_url,
        }
    }
}

#[async_trait]
impl DkimKeyDirectory for DkimClient {
    /// Calls `GET {archive}/api/key?domain={domain}`.
    async fn fetch_keys(&self, domain: &str) -> Result<Vec<DkimKey>, ClientError> {
        let mut url = self.archive_url.clone();
        url.set_path("api/key");
        url.set_query(Some(&format!("domain={domain}")));

        let entries: Vec<ArchiveEntry> = self.transport.get_json_absolute(&url).await?;
        Ok(entries
            .into_iter()
            .map(|e| DkimKey {
                selector: e.selector,
                key_type: e.key_type,
                value: e.value,
            })
            .collect())
    }
}
