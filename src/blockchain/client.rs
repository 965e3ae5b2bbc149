//! Oracle RPC client for one chain.
//!
//! # Responsibilities
//! - Hold the provider, signer and oracle binding for one chain
//! - Broadcast `updatePriceFeeds` transactions
//! - Poll for receipts until the transaction is mined
//! - Check that the endpoint serves the configured chain

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use tokio::time::interval;

use crate::attestation::PriceUpdateProof;
use crate::blockchain::transaction::{build_update_tx, UpdateParams};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;
use crate::blockchain::OracleWriter;
use crate::config::ChainDescriptor;

/// Connection, signer and contract binding for one chain.
#[derive(Clone)]
pub struct OracleClient {
    provider: DynProvider,
    wallet: Wallet,
    params: UpdateParams,
    rpc_url: String,
    poll_interval: Duration,
}

impl OracleClient {
    /// Build the client for `chain`.
    ///
    /// No network traffic happens here; every failure is a configuration problem.
    pub fn connect(chain: &ChainDescriptor, poll_interval: Duration) -> BlockchainResult<Self> {
        let url: url::Url = chain.rpc_url.parse().map_err(|e: url::ParseError| {
            BlockchainError::InvalidRpcUrl {
                url: chain.rpc_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let oracle: Address = chain.oracle_address.trim().parse().map_err(|e| {
            BlockchainError::InvalidAddress {
                address: chain.oracle_address.clone(),
                reason: format!("{}", e),
            }
        })?;

        let wallet = Wallet::from_private_key(&chain.private_key, chain.chain_id)?;

        // Pending nonce is re-read on every send; a rejected or abandoned
        // submission must not leave a nonce gap.
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .with_gas_estimation()
            .with_simple_nonce_management()
            .with_chain_id(chain.chain_id)
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            wallet,
            params: UpdateParams {
                oracle,
                gas_limit: chain.gas_limit,
                fee_wei: chain.update_fee_wei,
            },
            rpc_url: chain.rpc_url.clone(),
            poll_interval,
        })
    }

    /// Oracle contract address.
    pub fn oracle_address(&self) -> Address {
        self.params.oracle
    }

    /// Address transactions are sent from.
    pub fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.provider
            .get_chain_id()
            .await
            .map(ChainId)
            .map_err(|e| BlockchainError::Rpc(e.to_string()))
    }
}

#[async_trait]
impl OracleWriter for OracleClient {
    async fn submit_update(&self, proof: &PriceUpdateProof) -> BlockchainResult<TxHash> {
        let tx = build_update_tx(&self.params, proof).with_from(self.wallet.address());
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus> {
        let mut ticker = interval(self.poll_interval);

        loop {
            ticker.tick().await;

            let receipt = match self.provider.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => receipt,
                Ok(None) => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
                Err(e) => {
                    // Keep polling; the caller's timeout bounds the wait.
                    tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt query failed");
                    continue;
                }
            };

            let block_number = receipt.block_number.unwrap_or_default();
            return Ok(if receipt.status() {
                ConfirmationStatus::Confirmed {
                    tx_hash,
                    block_number,
                }
            } else {
                ConfirmationStatus::Reverted {
                    tx_hash,
                    block_number,
                }
            });
        }
    }

    async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let actual = self.get_chain_id().await?;
        let expected = self.wallet.chain_id();
        if actual.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: actual.0,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for OracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.wallet.chain_id())
            .field("oracle", &self.params.oracle)
            .field("wallet", &self.wallet.address())
            .finish()
    }
}
