//! Hermes client against a local mock backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use oracle_pusher::attestation::{FetchError, HermesClient};
use oracle_pusher::config::AttestationConfig;

mod common;
use common::{hermes_body, start_programmable_backend};

const BTC: &str = "e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43";
const ETH: &str = "ff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace";

fn client_for(endpoint: String) -> HermesClient {
    HermesClient::new(&AttestationConfig {
        endpoint,
        timeout_secs: 5,
        price_feed_ids: vec![BTC.to_string(), ETH.to_string()],
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_parses_proof_and_sends_feed_ids() {
    let seen = Arc::new(Mutex::new(String::new()));
    let seen_in_backend = seen.clone();
    let addr = start_programmable_backend(move |request_line| {
        *seen_in_backend.lock().unwrap() = request_line;
        async { (200, hermes_body("504e4155010000")) }
    })
    .await;

    let client = client_for(format!("http://{}/v2/updates/price/latest", addr));
    let proof = client.fetch_latest_proof().await.unwrap();

    assert_eq!(proof.data.to_vec(), vec![0x50, 0x4e, 0x41, 0x55, 0x01, 0x00, 0x00]);
    assert_eq!(proof.feed_ids, vec![BTC.to_string()]);
    assert_eq!(proof.publish_time, Some(1_700_000_000));

    let request_line = seen.lock().unwrap().clone();
    assert!(request_line.starts_with("GET /v2/updates/price/latest?"));
    assert!(request_line.contains(BTC));
    assert!(request_line.contains(ETH));
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let addr = start_programmable_backend(|_| async { (503, "{}".to_string()) }).await;
    let client = client_for(format!("http://{}/latest", addr));

    assert_eq!(client.fetch_latest_proof().await.unwrap_err(), FetchError::Status(503));
}

#[tokio::test]
async fn test_missing_binary_section() {
    let addr = start_programmable_backend(|_| async { (200, r#"{ "parsed": [] }"#.to_string()) }).await;
    let client = client_for(format!("http://{}/latest", addr));

    assert_eq!(client.fetch_latest_proof().await.unwrap_err(), FetchError::NoBinaryData);
}

#[tokio::test]
async fn test_empty_binary_data_list() {
    let addr = start_programmable_backend(|_| async {
        (200, r#"{ "binary": { "encoding": "hex", "data": [] } }"#.to_string())
    })
    .await;
    let client = client_for(format!("http://{}/latest", addr));

    assert_eq!(client.fetch_latest_proof().await.unwrap_err(), FetchError::NoBinaryData);
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let addr = start_programmable_backend(|_| async { (200, "<html>".to_string()) }).await;
    let client = client_for(format!("http://{}/latest", addr));

    assert!(matches!(
        client.fetch_latest_proof().await.unwrap_err(),
        FetchError::Malformed(_)
    ));
}

#[tokio::test]
async fn test_slow_backend_hits_timeout() {
    let addr = start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, hermes_body("504e4155"))
    })
    .await;
    let client =
        client_for(format!("http://{}/latest", addr)).with_request_timeout(Duration::from_millis(200));

    assert_eq!(
        client.fetch_latest_proof().await.unwrap_err(),
        FetchError::Timeout(Duration::from_millis(200))
    );
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let client = client_for("http://127.0.0.1:1/latest".to_string());

    assert!(matches!(
        client.fetch_latest_proof().await.unwrap_err(),
        FetchError::Request(_)
    ));
}
