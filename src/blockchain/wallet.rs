//! Per-chain signing key.
//!
//! The raw key only lives inside the signer; logs and `Debug` show the
//! derived address.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// EIP-155 signer bound to the chain it submits to.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Parse a 32-byte hex key, `0x` prefix optional.
    pub fn from_private_key(key: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key = key.trim();
        let signer = key
            .strip_prefix("0x")
            .unwrap_or(key)
            .parse::<PrivateKeySigner>()
            .map_err(|e| BlockchainError::Wallet(format!("private key is not valid hex: {}", e)))?
            .with_chain_id(Some(chain_id));

        tracing::debug!(address = %signer.address(), chain_id, "Signer loaded");
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Chain the signer was bound to at construction.
    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id().unwrap_or_default()
    }

    /// Wallet handed to the provider's signing filler.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        self.signer.clone().into()
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wallet({} on chain {})", self.address(), self.chain_id())
    }
}
