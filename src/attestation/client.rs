//! Hermes HTTP client with a hard request timeout.
//!
//! # Responsibilities
//! - Build the latest-price-update URL for the tracked feeds
//! - Bound every fetch by the configured timeout
//! - Map HTTP and payload failures to [`FetchError`]

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::attestation::types::{FetchError, FetchResult, HermesResponse, PriceUpdateProof};
use crate::attestation::ProofSource;
use crate::config::AttestationConfig;
use crate::resilience::with_timeout;

/// Client for the Pyth Hermes price service.
#[derive(Clone)]
pub struct HermesClient {
    http: reqwest::Client,
    endpoint: Url,
    feed_ids: Vec<String>,
    timeout: Duration,
}

impl HermesClient {
    /// Create a client from attestation settings.
    pub fn new(config: &AttestationConfig) -> FetchResult<Self> {
        let endpoint: Url = config.endpoint.parse().map_err(|e| {
            FetchError::Request(format!("Invalid attestation endpoint '{}': {}", config.endpoint, e))
        })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("oracle-pusher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        tracing::info!(
            endpoint = %endpoint,
            feeds = config.price_feed_ids.len(),
            timeout_secs = config.timeout_secs,
            "Attestation client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            feed_ids: config.price_feed_ids.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL including one `ids[]` pair per tracked feed.
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for id in &self.feed_ids {
                query.append_pair("ids[]", id);
            }
        }
        url
    }

    /// Tracked feed ids.
    pub fn feed_ids(&self) -> &[String] {
        &self.feed_ids
    }

    /// Fetch the newest proof covering all tracked feeds.
    pub async fn fetch_latest_proof(&self) -> FetchResult<PriceUpdateProof> {
        with_timeout(self.timeout, self.fetch_unbounded())
            .await
            .map_err(|elapsed| FetchError::Timeout(elapsed.0))?
    }

    async fn fetch_unbounded(&self) -> FetchResult<PriceUpdateProof> {
        let response = self
            .http
            .get(self.request_url())
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: HermesResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let proof = body.into_proof(&self.feed_ids)?;
        tracing::debug!(
            bytes = proof.data.len(),
            feeds = proof.feed_ids.len(),
            publish_time = ?proof.publish_time,
            "Received price update proof"
        );
        Ok(proof)
    }
}

#[async_trait]
impl ProofSource for HermesClient {
    async fn fetch_latest_proof(&self) -> FetchResult<PriceUpdateProof> {
        HermesClient::fetch_latest_proof(self).await
    }
}

impl std::fmt::Debug for HermesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HermesClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("feeds", &self.feed_ids.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}
