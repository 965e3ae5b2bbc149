//! Attestation network subsystem.
//!
//! # Data Flow
//! ```text
//! AttestationConfig (endpoint, feed ids, timeout)
//!     → client.rs (HTTP GET with hard timeout)
//!     → types.rs (JSON body → PriceUpdateProof)
//!     → handed to every chain updater
//! ```
//!
//! # Design Decisions
//! - One proof covers all tracked feeds; there are no per-feed requests
//! - Fetching has no side effects and is always safe to retry
//! - The client is shared read-only across chains

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::HermesClient;
pub use types::{FetchError, FetchResult, PriceUpdateProof};

/// Source of price update proofs.
#[async_trait]
pub trait ProofSource: Send + Sync {
    /// Fetch the newest proof for all tracked feeds.
    async fn fetch_latest_proof(&self) -> FetchResult<PriceUpdateProof>;
}
