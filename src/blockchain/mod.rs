//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ChainDescriptor (RPC URL, private key, oracle address)
//!     → wallet.rs (key loading, signing)
//!     → transaction.rs (updatePriceFeeds calldata, fee, gas limit)
//!     → client.rs (broadcast, receipt polling)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - Construction is offline; connectivity problems surface per cycle

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

use alloy::primitives::TxHash;
use async_trait::async_trait;

use crate::attestation::PriceUpdateProof;

pub use client::OracleClient;
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus};
pub use wallet::Wallet;

/// Write access to one chain's oracle contract.
#[async_trait]
pub trait OracleWriter: Send + Sync {
    /// Broadcast an `updatePriceFeeds` transaction carrying `proof`.
    async fn submit_update(&self, proof: &PriceUpdateProof) -> BlockchainResult<TxHash>;

    /// Wait until `tx_hash` is mined. Unbounded; callers apply their own timeout.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus>;

    /// Check the endpoint serves the expected chain.
    async fn verify_chain_id(&self) -> BlockchainResult<()> {
        Ok(())
    }
}
