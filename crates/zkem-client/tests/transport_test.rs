//! Transport-level contract tests: API-key injection, bearer tokens
//! from the auth provider, and the 401 expiry callback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zkem_client::{AuthProvider, ClientError, RegistryClient, RegistryConfig};

/// Auth provider that counts expiry callbacks.
#[derive(Default)]
struct CountingProvider {
    expired: AtomicUsize,
}

#[async_trait]
impl AuthProvider for CountingProvider {
    async fn get_token(&self) -> Result<Option<String>, ClientError> {
        Ok(Some("session-token".into()))
    }

    async fn on_token_expired(&self) -> Result<(), ClientError> {
        self.expired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn api_key_header_is_sent_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_1/status"))
        .and(header("x-api-key", "k-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "InProgress"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = RegistryConfig::for_base_url(&server.uri())
        .unwrap()
        .with_api_key("k-123");
    let client = RegistryClient::new(config).unwrap();
    client.proofs().status("prf_1").await.unwrap();
}

#[tokio::test]
async fn bearer_token_comes_from_the_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_1/status"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Done"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = RegistryConfig::for_base_url(&server.uri())
        .unwrap()
        .with_auth(Arc::new(CountingProvider::default()));
    let client = RegistryClient::new(config).unwrap();
    client.proofs().status("prf_1").await.unwrap();
}

#[tokio::test]
async fn unauthorized_triggers_expiry_callback_then_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_1/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = Arc::new(CountingProvider::default());
    let config = RegistryConfig::for_base_url(&server.uri())
        .unwrap()
        .with_auth(provider.clone());
    let client = RegistryClient::new(config).unwrap();

    let err = client.proofs().status("prf_1").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert_eq!(provider.expired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn patch_and_delete_verbs_carry_the_same_injection() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/resource/1"))
        .and(header("x-api-key", "k-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/resource/1"))
        .and(header("x-api-key", "k-123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = RegistryConfig::for_base_url(&server.uri())
        .unwrap()
        .with_api_key("k-123");
    let transport = zkem_client::Transport::new(&config).unwrap();

    let patched: serde_json::Value = transport
        .patch_json("resource/1", &serde_json::json!({"field": "value"}))
        .await
        .unwrap();
    assert_eq!(patched["ok"], true);
    transport.delete("resource/1").await.unwrap();
}

#[tokio::test]
async fn anonymous_client_sends_no_auth_headers() {
    let server = MockServer::start().await;

    // The mock matches only the path; the assertion is that the request
    // succeeds without either credential header configured.
    Mock::given(method("GET"))
        .and(path("/proof/prf_1/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Failed"})),
        )
        .mount(&server)
        .await;

    let client =
        RegistryClient::new(RegistryConfig::for_base_url(&server.uri()).unwrap()).unwrap();
    let status = client.proofs().status("prf_1").await.unwrap();
    assert_eq!(status, zkem_core::ProofStatus::Failed);
}
