//! Contract tests for the blueprint resource client: props, compiled
//! artifact links, and local-proof accounting.

use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zkem_client::{RegistryClient, RegistryConfig};
use zkem_core::ZkFramework;

const BP: &str = "550e8400-e29b-41d4-a716-446655440000";

async fn client(server: &MockServer) -> RegistryClient {
    RegistryClient::new(RegistryConfig::for_base_url(&server.uri()).unwrap()).unwrap()
}

fn bp_id() -> Uuid {
    BP.parse().unwrap()
}

#[tokio::test]
async fn get_decodes_blueprint_props() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/blueprint/{BP}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": BP,
            "slug": "acme/receipt",
            "clientZkFramework": "circom",
            "serverZkFramework": "sp1",
            "senderDomain": "acme.com",
            "decomposedRegexes": [{
                "name": "subject",
                "location": "header",
                "maxLength": 50,
                "parts": [
                    {"isPublic": false, "regexDef": "subject:"},
                    {"isPublic": true, "regexDef": "[^\r\n]+"}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let props = client(&server).await.blueprints().get(bp_id()).await.unwrap();
    assert_eq!(props.slug.as_deref(), Some("acme/receipt"));
    assert_eq!(props.client_zk_framework, Some(ZkFramework::Circom));
    assert_eq!(props.server_zk_framework, Some(ZkFramework::Sp1));
    assert_eq!(props.decomposed_regexes.len(), 1);
    assert_eq!(props.decomposed_regexes[0].parts.len(), 2);
}

#[tokio::test]
async fn chunked_zkey_urls_returns_links_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/blueprint/{BP}/chunked-zkey-urls")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "urls": [
                "https://artifacts.example/zkey.0",
                "https://artifacts.example/zkey.1",
                "https://artifacts.example/zkey.2"
            ]
        })))
        .mount(&server)
        .await;

    let urls = client(&server)
        .await
        .blueprints()
        .chunked_zkey_urls(bp_id())
        .await
        .unwrap();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].ends_with("zkey.0"));
    assert!(urls[2].ends_with("zkey.2"));
}

#[tokio::test]
async fn wasm_url_and_vkey_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/blueprint/{BP}/wasm-url")))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"url": "https://artifacts.example/circuit.wasm"}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/blueprint/{BP}/vkey")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"vkey": "{\"protocol\":\"groth16\"}"})),
        )
        .mount(&server)
        .await;

    let c = client(&server).await;
    let wasm = c.blueprints().wasm_url(bp_id()).await.unwrap();
    assert!(wasm.ends_with("circuit.wasm"));
    let vkey = c.blueprints().vkey(bp_id()).await.unwrap();
    assert!(vkey.contains("groth16"));
}

#[tokio::test]
async fn noir_regex_graphs_are_keyed_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/blueprint/{BP}/noir-regex-graphs")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subject": {"states": 12},
            "amount": {"states": 7}
        })))
        .mount(&server)
        .await;

    let graphs = client(&server)
        .await
        .blueprints()
        .noir_regex_graphs(bp_id())
        .await
        .unwrap();
    assert_eq!(graphs.len(), 2);
    assert_eq!(graphs["subject"]["states"], 12);
}

#[tokio::test]
async fn increment_local_proof_count_posts_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/blueprint/{BP}/local-proofs")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .blueprints()
        .increment_local_proof_count(bp_id())
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_blueprint_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/blueprint/{BP}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such blueprint"))
        .mount(&server)
        .await;

    let err = client(&server).await.blueprints().get(bp_id()).await.unwrap_err();
    match err {
        zkem_client::ClientError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("expected ApiError, got {other:?}"),
    }
}
