//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Chain id as reported by an RPC endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Failures talking to a chain or binding to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockchainError {
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC endpoint URL could not be parsed.
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    /// Oracle contract address is not a well-formed address.
    #[error("Invalid oracle address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Signer key could not be parsed.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The endpoint serves another chain than configured.
    #[error("RPC serves chain {actual}, configured for {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
}

pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Final state of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Mined with a success status.
    Confirmed { tx_hash: TxHash, block_number: u64 },
    /// Mined but reverted.
    Reverted { tx_hash: TxHash, block_number: u64 },
}

impl ConfirmationStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ConfirmationStatus::Confirmed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId(8453).to_string(), "8453");
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::ChainMismatch {
            expected: 1,
            actual: 56,
        };
        assert_eq!(err.to_string(), "RPC serves chain 56, configured for 1");

        let err = BlockchainError::InvalidAddress {
            address: "0xnope".into(),
            reason: "odd number of digits".into(),
        };
        assert!(err.to_string().contains("0xnope"));
    }

    #[test]
    fn test_confirmation_status() {
        let ok = ConfirmationStatus::Confirmed {
            tx_hash: TxHash::ZERO,
            block_number: 100,
        };
        let reverted = ConfirmationStatus::Reverted {
            tx_hash: TxHash::ZERO,
            block_number: 100,
        };
        assert!(ok.is_success());
        assert!(!reverted.is_success());
    }
}
