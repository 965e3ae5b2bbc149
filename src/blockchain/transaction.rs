//! Oracle transaction building.
//!
//! # Responsibilities
//! - Encode `updatePriceFeeds(bytes[])` calldata
//! - Attach the update fee and a fixed gas limit
//!
//! Nonce, fee market fields and the chain id are left to the provider's fillers.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::attestation::PriceUpdateProof;

sol! {
    /// Write surface of a Pyth-compatible oracle contract.
    interface IPythOracle {
        function updatePriceFeeds(bytes[] calldata updateData) external payable;
    }
}

/// Parameters of one oracle update transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateParams {
    pub oracle: Address,
    pub gas_limit: u64,
    pub fee_wei: u64,
}

/// Encode the calldata for pushing `proof` to the oracle.
pub fn encode_update_call(proof: &PriceUpdateProof) -> Bytes {
    let call = IPythOracle::updatePriceFeedsCall {
        updateData: vec![proof.data.clone()],
    };
    Bytes::from(call.abi_encode())
}

/// Build the `updatePriceFeeds` transaction request.
pub fn build_update_tx(params: &UpdateParams, proof: &PriceUpdateProof) -> TransactionRequest {
    TransactionRequest::default()
        .with_to(params.oracle)
        .with_value(U256::from(params.fee_wei))
        .with_input(encode_update_call(proof))
        .with_gas_limit(params.gas_limit)
}
