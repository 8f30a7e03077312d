//! # Transport
//!
//! The one request path every sub-client uses: verb helpers over a
//! shared `reqwest::Client`, with the API-key header and the bearer
//! token injected on every request. The bearer token is fetched from
//! the provider per request, so rotated tokens take effect without
//! rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use zeroize::Zeroizing;

use crate::auth::AuthProvider;
use crate::config::RegistryConfig;
use crate::error::ClientError;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Shared request path for all registry sub-clients.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<Zeroizing<String>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("auth", &self.auth.as_ref().map(|_| "<provider>"))
            .finish()
    }
}

impl Transport {
    /// Build the transport from configuration.
    pub fn new(config: &RegistryConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            auth: config.auth.clone(),
        })
    }

    /// `GET {base}/{path}`, decoding a JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let endpoint = format!("GET /{path}");
        let builder = self.http.get(self.url(path));
        let resp = self.send(endpoint.clone(), builder).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// `POST {base}/{path}` with a JSON body, decoding a JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let endpoint = format!("POST /{path}");
        let builder = self.http.post(self.url(path)).json(body);
        let resp = self.send(endpoint.clone(), builder).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// `POST {base}/{path}` with a JSON body, ignoring the response body.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let endpoint = format!("POST /{path}");
        let builder = self.http.post(self.url(path)).json(body);
        self.send(endpoint, builder).await?;
        Ok(())
    }

    /// `PATCH {base}/{path}` with a JSON body, decoding a JSON response.
    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let endpoint = format!("PATCH /{path}");
        let builder = self.http.patch(self.url(path)).json(body);
        let resp = self.send(endpoint.clone(), builder).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// `DELETE {base}/{path}`, ignoring the response body.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let endpoint = format!("DELETE /{path}");
        let builder = self.http.delete(self.url(path));
        self.send(endpoint, builder).await?;
        Ok(())
    }

    /// `GET {url}` against an absolute URL outside the registry base
    /// (artifact downloads, the DKIM archive).
    pub async fn get_json_absolute<T: DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<T, ClientError> {
        let endpoint = format!("GET {url}");
        let builder = self.http.get(url.clone());
        let resp = self.send(endpoint.clone(), builder).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint,
            source: e,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        endpoint: String,
        mut builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key.as_str());
        }
        if let Some(auth) = &self.auth {
            if let Some(token) = auth.get_token().await? {
                builder = builder.bearer_auth(token);
            }
        }

        tracing::debug!(endpoint = %endpoint, "registry request");
        let resp = builder.send().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            if let Some(auth) = &self.auth {
                if let Err(e) = auth.on_token_expired().await {
                    tracing::warn!(endpoint = %endpoint, error = %e, "token expiry callback failed");
                }
            }
            return Err(ClientError::Unauthorized { endpoint });
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                endpoint,
                status,
                body,
            });
        }
        Ok(resp)
    }
}
