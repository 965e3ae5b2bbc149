//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration structure for the pusher.
//! All types derive Serde traits for deserialization from JSON or TOML files.
//! Field names are camelCase to stay compatible with existing `Settings.json` files.

use serde::{Deserialize, Serialize};

/// Root configuration file as written on disk.
///
/// Two shapes are accepted: the multichain shape with a `chains` list, and the
/// legacy single-chain shape with flat `rpcUrl` / `privateKey` / `oracleAddress`
/// fields. Use [`SettingsFile::shape`] to decide which one was given.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsFile {
    /// Chain list (multichain shape).
    pub chains: Option<Vec<ChainEntry>>,

    /// JSON-RPC endpoint URL (legacy shape).
    pub rpc_url: Option<String>,

    /// Hex-encoded signer key (legacy shape).
    pub private_key: Option<String>,

    /// Oracle contract address (legacy shape).
    pub oracle_address: Option<String>,

    /// Update loop tuning.
    pub updater: UpdaterConfig,

    /// Attestation network settings.
    pub attestation: AttestationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// The configuration shape, decided once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigShape {
    /// Pre-multichain file with a single set of flat fields.
    Legacy(LegacyChain),
    /// File with an explicit `chains` list.
    Multichain(Vec<ChainEntry>),
}

/// Flat single-chain fields from a legacy file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyChain {
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub oracle_address: Option<String>,
}

impl SettingsFile {
    /// Classify the file by the presence of the `chains` list.
    pub fn shape(&self) -> ConfigShape {
        match &self.chains {
            Some(chains) => ConfigShape::Multichain(chains.clone()),
            None => ConfigShape::Legacy(LegacyChain {
                rpc_url: self.rpc_url.clone(),
                private_key: self.private_key.clone(),
                oracle_address: self.oracle_address.clone(),
            }),
        }
    }
}

/// One entry of the `chains` list.
///
/// Every field is optional at this level; requiredness depends on `enabled`
/// and is checked during resolution.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub oracle_address: Option<String>,

    /// Defaults to true when absent.
    pub enabled: Option<bool>,

    /// Per-chain gas limit, overriding `updater.gasLimit`.
    pub gas_limit: Option<u64>,

    /// Per-chain update fee in wei, overriding `updater.updateFeeWei`.
    pub update_fee_wei: Option<u64>,
}

/// Update loop tuning shared by all chains.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdaterConfig {
    /// Sleep between cycles in seconds.
    pub update_interval_secs: u64,

    /// Attempts per cycle (including the first).
    pub max_retries: u32,

    /// Fixed delay between attempts in seconds.
    pub retry_delay_secs: u64,

    /// Bound on submission and, separately, on confirmation.
    pub tx_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_ms: u64,

    /// Gas limit for `updatePriceFeeds`.
    pub gas_limit: u64,

    /// Value attached to `updatePriceFeeds`, in wei.
    pub update_fee_wei: u64,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 600,
            max_retries: 3,
            retry_delay_secs: 10,
            tx_timeout_secs: 300,
            receipt_poll_ms: 2000,
            gas_limit: 500_000,
            update_fee_wei: 10,
        }
    }
}

/// Attestation network (Hermes) settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AttestationConfig {
    /// Latest-price-update endpoint.
    pub endpoint: String,

    /// Hard timeout for one fetch in seconds.
    pub timeout_secs: u64,

    /// Hex feed ids (without 0x) included in every proof.
    pub price_feed_ids: Vec<String>,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://hermes.pyth.network/v2/updates/price/latest".to_string(),
            timeout_secs: 30,
            price_feed_ids: vec![
                // BTC/USD
                "e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43".to_string(),
                // ETH/USD
                "ff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace".to_string(),
                // USDC/USD
                "78d185a741d07edb3412b09008b7c5cfb9bbbd7d568bf00ba737b456ba171501".to_string(),
                "eaa020c61cc479712813461ce153894a96a6c00b21ed0cfc2798d1f9a9e9c94a".to_string(),
            ],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservabilityConfig {
    /// Prometheus scrape address; metrics export is off when unset.
    pub metrics_address: Option<String>,
}
