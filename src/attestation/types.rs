//! Attestation payloads and error definitions.

use std::time::Duration;

use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while fetching a price update proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured bound.
    #[error("attestation request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The endpoint answered with a non-2xx status.
    #[error("attestation endpoint returned HTTP {0}")]
    Status(u16),

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("attestation request failed: {0}")]
    Request(String),

    /// The body could not be interpreted.
    #[error("malformed attestation response: {0}")]
    Malformed(String),

    /// The body had no proof blob.
    #[error("no binary data")]
    NoBinaryData,
}

/// Result type for attestation operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// A signed batch of price updates for every tracked feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdateProof {
    /// Opaque payload handed to `updatePriceFeeds`.
    pub data: Bytes,
    /// Feed ids the payload covers.
    pub feed_ids: Vec<String>,
    /// Newest publish time among the parsed feeds, if reported.
    pub publish_time: Option<i64>,
}

/// Body of `GET /v2/updates/price/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct HermesResponse {
    #[serde(default)]
    pub binary: Option<BinaryUpdate>,
    #[serde(default)]
    pub parsed: Vec<ParsedPriceUpdate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BinaryUpdate {
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub data: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedPriceUpdate {
    pub id: String,
    #[serde(default)]
    pub price: Option<PriceSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceSnapshot {
    pub price: String,
    pub conf: String,
    pub expo: i32,
    pub publish_time: i64,
}

impl HermesResponse {
    /// Extract the proof from the first binary blob.
    ///
    /// `requested` is used as the covered feed list when the body carries no
    /// parsed section.
    pub fn into_proof(self, requested: &[String]) -> FetchResult<PriceUpdateProof> {
        let binary = self.binary.ok_or(FetchError::NoBinaryData)?;

        if !binary.encoding.is_empty() && !binary.encoding.eq_ignore_ascii_case("hex") {
            return Err(FetchError::Malformed(format!(
                "unsupported encoding '{}'",
                binary.encoding
            )));
        }

        let blob = binary
            .data
            .into_iter()
            .next()
            .filter(|blob| !blob.is_empty())
            .ok_or(FetchError::NoBinaryData)?;

        let data = alloy::hex::decode(&blob)
            .map_err(|e| FetchError::Malformed(format!("binary data is not hex: {}", e)))?;
        if data.is_empty() {
            return Err(FetchError::NoBinaryData);
        }

        let publish_time = self
            .parsed
            .iter()
            .filter_map(|p| p.price.as_ref().map(|price| price.publish_time))
            .max();

        let feed_ids = if self.parsed.is_empty() {
            requested.to_vec()
        } else {
            self.parsed.into_iter().map(|p| p.id).collect()
        };

        Ok(PriceUpdateProof {
            data: Bytes::from(data),
            feed_ids,
            publish_time,
        })
    }
}
