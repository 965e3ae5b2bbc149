//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Bytes, TxHash};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};

use oracle_pusher::attestation::{FetchError, FetchResult, PriceUpdateProof, ProofSource};
use oracle_pusher::blockchain::{BlockchainError, BlockchainResult, ConfirmationStatus, OracleWriter};

/// Start a programmable mock HTTP backend on an ephemeral port.
///
/// The handler receives the request line and returns `(status, body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let request = String::from_utf8_lossy(&buf[..n]);
                        let request_line = request.lines().next().unwrap_or_default().to_string();

                        let (status, body) = f(request_line).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock JSON-RPC node on an ephemeral port.
///
/// The handler maps `(method, params)` to a result, or to an error message
/// returned as a JSON-RPC error object. Batches are answered call by call.
pub async fn start_json_rpc_backend<F>(handler: F) -> SocketAddr
where
    F: Fn(&str, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let handler = handler.clone();
            tokio::spawn(async move {
                let Some(body) = read_http_body(&mut socket).await else {
                    return;
                };
                let Ok(request) = serde_json::from_slice::<Value>(&body) else {
                    return;
                };

                let reply = match &request {
                    Value::Array(calls) => {
                        Value::Array(calls.iter().map(|call| answer_call(handler.as_ref(), call)).collect())
                    }
                    call => answer_call(handler.as_ref(), call),
                };

                let body = reply.to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn answer_call<F>(handler: &F, call: &Value) -> Value
where
    F: Fn(&str, &Value) -> Result<Value, String>,
{
    let id = call["id"].clone();
    let method = call["method"].as_str().unwrap_or_default();
    match handler(method, &call["params"]) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32000, "message": message }
        }),
    }
}

/// Read one HTTP request and return its body.
async fn read_http_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let start = end + 4;
        while buf.len() < start + length {
            let n = socket.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        return Some(buf[start..start + length].to_vec());
    }
}

/// Hermes-shaped body carrying `blob` as the first binary entry.
pub fn hermes_body(blob: &str) -> String {
    format!(
        r#"{{
            "binary": {{ "encoding": "hex", "data": ["{}"] }},
            "parsed": [
                {{ "id": "e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43",
                   "price": {{ "price": "6512345000000", "conf": "3200000000", "expo": -8, "publish_time": 1700000000 }} }}
            ]
        }}"#,
        blob
    )
}

pub fn sample_proof() -> PriceUpdateProof {
    PriceUpdateProof {
        data: Bytes::from(vec![0x50, 0x4e, 0x41, 0x55, 0x01]),
        feed_ids: vec!["e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43".to_string()],
        publish_time: Some(1_700_000_000),
    }
}

/// Proof source replaying a script, then a fixed fallback result.
pub struct ScriptedSource {
    script: Mutex<VecDeque<FetchResult<PriceUpdateProof>>>,
    fallback: FetchResult<PriceUpdateProof>,
    calls: Arc<AtomicU32>,
}

impl ScriptedSource {
    /// Replays `script`, then succeeds forever.
    pub fn new(script: Vec<FetchResult<PriceUpdateProof>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: Ok(sample_proof()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn healthy() -> Self {
        Self::new(Vec::new())
    }

    pub fn always_failing(error: FetchError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(error),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

#[async_trait]
impl ProofSource for ScriptedSource {
    async fn fetch_latest_proof(&self) -> FetchResult<PriceUpdateProof> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

/// How the fake oracle reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleBehavior {
    Confirm,
    Revert,
    RejectSubmit,
    HangOnSubmit,
    HangOnReceipt,
    PanicOnSubmit,
    /// Confirms updates, but the startup chain check never answers.
    HangOnChainCheck,
}

pub struct FakeOracle {
    behavior: OracleBehavior,
    submissions: Arc<AtomicU32>,
}

impl FakeOracle {
    pub fn new(behavior: OracleBehavior) -> Self {
        Self {
            behavior,
            submissions: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn submissions(&self) -> Arc<AtomicU32> {
        self.submissions.clone()
    }
}

pub const FAKE_TX_HASH: TxHash = TxHash::repeat_byte(0xab);

#[async_trait]
impl OracleWriter for FakeOracle {
    async fn submit_update(&self, proof: &PriceUpdateProof) -> BlockchainResult<TxHash> {
        assert!(!proof.data.is_empty());
        self.submissions.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            OracleBehavior::HangOnSubmit => std::future::pending().await,
            OracleBehavior::RejectSubmit => Err(BlockchainError::Rpc("insufficient funds".to_string())),
            OracleBehavior::PanicOnSubmit => panic!("oracle exploded"),
            _ => Ok(FAKE_TX_HASH),
        }
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus> {
        match self.behavior {
            OracleBehavior::HangOnReceipt => std::future::pending().await,
            OracleBehavior::Revert => Ok(ConfirmationStatus::Reverted {
                tx_hash,
                block_number: 100,
            }),
            _ => Ok(ConfirmationStatus::Confirmed {
                tx_hash,
                block_number: 100,
            }),
        }
    }

    async fn verify_chain_id(&self) -> BlockchainResult<()> {
        match self.behavior {
            OracleBehavior::HangOnChainCheck => std::future::pending().await,
            _ => Ok(()),
        }
    }
}
