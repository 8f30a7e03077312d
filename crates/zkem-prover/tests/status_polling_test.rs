//! Status-machine tests against a mock registry: transition-triggered
//! full refetch, terminal caching, and completion waiting.

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zkem_client::{RegistryClient, RegistryConfig};
use zkem_core::{BlueprintProps, ProofStatus};
use zkem_prover::{Proof, ProverError};

const BP: &str = "550e8400-e29b-41d4-a716-446655440000";

fn client(server: &MockServer) -> RegistryClient {
    RegistryClient::new(RegistryConfig::for_base_url(&server.uri()).unwrap()).unwrap()
}

fn blueprint() -> Arc<BlueprintProps> {
    Arc::new(
        serde_json::from_value(serde_json::json!({
            "id": BP,
            "senderDomain": "acme.com"
        }))
        .unwrap(),
    )
}

fn in_progress_record(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "blueprintId": BP,
        "status": "InProgress"
    })
}

#[tokio::test]
async fn transition_to_done_refetches_the_full_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_1/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Done"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proof/prf_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "prf_1",
            "blueprintId": BP,
            "status": "Done",
            "zkFramework": "circom",
            "proofData": {"piA": ["1", "2"]},
            "publicOutputs": ["7", "1", "2"],
            "publicData": {"subject": ["hello"]},
            "provedAt": "2026-03-01T10:00:42Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut proof = Proof::from_remote(
        client(&server),
        blueprint(),
        serde_json::from_value(in_progress_record("prf_1")).unwrap(),
    )
    .unwrap();

    let status = proof.check_status().await.unwrap();
    assert_eq!(status, ProofStatus::Done);

    // The refetch landed every result field together with the status.
    let props = proof.props();
    assert!(props.proof_data.is_some());
    assert!(props.public_outputs.is_some());
    assert_eq!(props.public_data["subject"], vec!["hello"]);
    assert!(props.proved_at.is_some());
}

#[tokio::test]
async fn terminal_status_is_cached_and_never_refetched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_2/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Failed"})),
        )
        // One transition poll; the cached terminal state answers the rest.
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proof/prf_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "prf_2",
            "blueprintId": BP,
            "status": "Failed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut proof = Proof::from_remote(
        client(&server),
        blueprint(),
        serde_json::from_value(in_progress_record("prf_2")).unwrap(),
    )
    .unwrap();

    assert_eq!(proof.check_status().await.unwrap(), ProofStatus::Failed);
    for _ in 0..4 {
        assert_eq!(proof.check_status().await.unwrap(), ProofStatus::Failed);
    }
}

#[tokio::test]
async fn wait_for_completion_polls_until_terminal() {
    let server = MockServer::start().await;

    // First poll sees InProgress, the second (after the 2s backoff)
    // sees Done.
    Mock::given(method("GET"))
        .and(path("/proof/prf_3/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "InProgress"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proof/prf_3/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Done"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proof/prf_3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "prf_3",
            "blueprintId": BP,
            "status": "Done",
            "proofData": {"piA": ["1", "2"]}
        })))
        .mount(&server)
        .await;

    let mut proof = Proof::from_remote(
        client(&server),
        blueprint(),
        serde_json::from_value(in_progress_record("prf_3")).unwrap(),
    )
    .unwrap();

    let started = std::time::Instant::now();
    let status = proof.wait_for_completion().await.unwrap();
    assert_eq!(status, ProofStatus::Done);
    // The second poll honored the first backoff window.
    assert!(started.elapsed() >= std::time::Duration::from_secs(2));
    assert!(proof.proof_data().is_ok());
}

#[tokio::test]
async fn cancellation_hook_stops_waiting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_4/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "InProgress"})),
        )
        .mount(&server)
        .await;

    let mut proof = Proof::from_remote(
        client(&server),
        blueprint(),
        serde_json::from_value(in_progress_record("prf_4")).unwrap(),
    )
    .unwrap();

    let (tx, mut rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let _ = tx.send(true);
    });

    let outcome = proof.wait_for_completion_with(&mut rx).await.unwrap();
    assert_eq!(outcome, None);
    assert_eq!(proof.status(), ProofStatus::InProgress);
}

#[tokio::test]
async fn transport_failure_propagates() {
    // Closed port: the status poll fails as a transport error, not a
    // panic or a silent retry.
    let config = RegistryConfig::for_base_url("http://127.0.0.1:1").unwrap();
    let client = RegistryClient::new(config).unwrap();

    let mut proof = Proof::from_remote(
        client,
        blueprint(),
        serde_json::from_value(serde_json::json!({
            "id": "prf_5",
            "blueprintId": BP,
            "status": "InProgress"
        }))
        .unwrap(),
    )
    .unwrap();

    let err = proof.check_status().await.unwrap_err();
    assert!(matches!(err, ProverError::Client(_)));
}

#[tokio::test]
async fn status_equal_to_previous_does_not_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proof/prf_6/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "InProgress"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    // No mock for GET /proof/prf_6: a refetch attempt would 404 and
    // fail the test.

    let mut proof = Proof::from_remote(
        client(&server),
        blueprint(),
        serde_json::from_value(in_progress_record("prf_6")).unwrap(),
    )
    .unwrap();

    assert_eq!(proof.check_status().await.unwrap(), ProofStatus::InProgress);
}
