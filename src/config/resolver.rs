//! Resolution of a settings file into the list of chains to run.
//!
//! Applies environment overrides, migrates the legacy single-chain shape,
//! checks required fields of enabled chains and drops disabled ones.

use std::fmt;
use std::path::Path;

use crate::config::loader::{load_settings_file, ConfigError};
use crate::config::schema::{
    AttestationConfig, ChainEntry, ConfigShape, LegacyChain, ObservabilityConfig, SettingsFile,
    UpdaterConfig,
};
use crate::config::validation::{missing_fields, validate_settings, RequiredValues};

/// Environment variable overriding the RPC URL.
pub const RPC_URL_ENV_VAR: &str = "REDEEMER_RPC_URL";
/// Environment variable overriding the signer key.
pub const PRIVATE_KEY_ENV_VAR: &str = "REDEEMER_PRIVATE_KEY";
/// Environment variable overriding the oracle address.
pub const ORACLE_ADDRESS_ENV_VAR: &str = "REDEEMER_ORACLE_ADDRESS";

/// Chain id given to a migrated legacy configuration.
pub const LEGACY_CHAIN_ID: u64 = 1;
/// Chain name given to a migrated legacy configuration.
pub const LEGACY_CHAIN_NAME: &str = "Ethereum";

/// One fully resolved chain target.
#[derive(Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_url: String,
    pub private_key: String,
    pub oracle_address: String,
    pub enabled: bool,
    pub gas_limit: u64,
    pub update_fee_wei: u64,
}

impl ChainDescriptor {
    /// `name:id` label used in logs and metrics.
    pub fn label(&self) -> String {
        format!("{}:{}", self.chain_name, self.chain_id)
    }
}

// The private key never reaches logs.
impl fmt::Debug for ChainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainDescriptor")
            .field("chain_id", &self.chain_id)
            .field("chain_name", &self.chain_name)
            .field("rpc_url", &self.rpc_url)
            .field("oracle_address", &self.oracle_address)
            .field("enabled", &self.enabled)
            .field("gas_limit", &self.gas_limit)
            .field("update_fee_wei", &self.update_fee_wei)
            .finish_non_exhaustive()
    }
}

/// Validated, immutable configuration consumed once by the orchestrator.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Enabled chains, in file order.
    pub chains: Vec<ChainDescriptor>,
    /// Labels of the entries switched off with `enabled: false`, in file order.
    pub disabled: Vec<String>,
    pub updater: UpdaterConfig,
    pub attestation: AttestationConfig,
    pub observability: ObservabilityConfig,
}

/// Load the settings file at `path` and resolve it against the process environment.
pub fn resolve(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let settings = load_settings_file(path)?;
    resolve_with_env(settings, |key| std::env::var(key).ok())
}

/// Resolve parsed settings using `env` for variable lookups.
pub fn resolve_with_env<F>(settings: SettingsFile, env: F) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    let mut chains = Vec::new();
    let mut disabled = Vec::new();

    match settings.shape() {
        ConfigShape::Legacy(legacy) => chains.extend(migrate_legacy(legacy, &settings.updater, &env)?),
        ConfigShape::Multichain(entries) => {
            for (index, entry) in entries.into_iter().enumerate() {
                let label = entry_label(index, &entry);
                match resolve_entry(index, entry, &settings.updater, &env)? {
                    Some(chain) => chains.push(chain),
                    None => disabled.push(label),
                }
            }
        }
    }

    if chains.is_empty() {
        return Err(ConfigError::NoEnabledChains);
    }

    Ok(ResolvedConfig {
        chains,
        disabled,
        updater: settings.updater,
        attestation: settings.attestation,
        observability: settings.observability,
    })
}

/// Environment value wins over the file value; blank values count as absent.
fn overlay(env_value: Option<String>, file_value: Option<String>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(file_value)
        .filter(|v| !v.trim().is_empty())
}

fn migrate_legacy<F>(
    legacy: LegacyChain,
    updater: &UpdaterConfig,
    env: &F,
) -> Result<Option<ChainDescriptor>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    tracing::debug!("Migrating legacy single-chain configuration");

    let entry = ChainEntry {
        chain_id: Some(LEGACY_CHAIN_ID),
        chain_name: Some(LEGACY_CHAIN_NAME.to_string()),
        rpc_url: overlay(env(RPC_URL_ENV_VAR), legacy.rpc_url),
        private_key: overlay(env(PRIVATE_KEY_ENV_VAR), legacy.private_key),
        oracle_address: overlay(env(ORACLE_ADDRESS_ENV_VAR), legacy.oracle_address),
        enabled: Some(true),
        gas_limit: None,
        update_fee_wei: None,
    };

    into_descriptor(entry, LEGACY_CHAIN_NAME.to_string(), updater)
}

fn resolve_entry<F>(
    index: usize,
    entry: ChainEntry,
    updater: &UpdaterConfig,
    env: &F,
) -> Result<Option<ChainDescriptor>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let indexed = |name: &str| env(&format!("{}_{}", name, index));

    let display_name = display_name(index, &entry);

    let entry = ChainEntry {
        rpc_url: overlay(indexed(RPC_URL_ENV_VAR), entry.rpc_url),
        private_key: overlay(indexed(PRIVATE_KEY_ENV_VAR), entry.private_key),
        oracle_address: overlay(indexed(ORACLE_ADDRESS_ENV_VAR), entry.oracle_address),
        ..entry
    };

    into_descriptor(entry, display_name, updater)
}

/// Chain name, or the entry's position when the name is missing.
fn display_name(index: usize, entry: &ChainEntry) -> String {
    entry
        .chain_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("chains[{}]", index))
}

fn entry_label(index: usize, entry: &ChainEntry) -> String {
    match entry.chain_id {
        Some(id) => format!("{}:{}", display_name(index, entry), id),
        None => display_name(index, entry),
    }
}

/// Returns `None` for disabled entries, which may be incomplete.
fn into_descriptor(
    entry: ChainEntry,
    display_name: String,
    updater: &UpdaterConfig,
) -> Result<Option<ChainDescriptor>, ConfigError> {
    let enabled = entry.enabled.unwrap_or(true);

    let missing = missing_fields(&RequiredValues {
        chain_id: entry.chain_id,
        chain_name: entry.chain_name.as_deref(),
        rpc_url: entry.rpc_url.as_deref(),
        private_key: entry.private_key.as_deref(),
        oracle_address: entry.oracle_address.as_deref(),
    });

    if !enabled {
        if !missing.is_empty() {
            tracing::debug!(chain = %display_name, missing = ?missing, "Disabled chain is incomplete");
        }
        return Ok(None);
    }

    if !missing.is_empty() {
        return Err(ConfigError::MissingFields {
            chain: display_name,
            fields: missing,
        });
    }

    match entry {
        ChainEntry {
            chain_id: Some(chain_id),
            chain_name: Some(chain_name),
            rpc_url: Some(rpc_url),
            private_key: Some(private_key),
            oracle_address: Some(oracle_address),
            gas_limit,
            update_fee_wei,
            ..
        } => Ok(Some(ChainDescriptor {
            chain_id,
            chain_name,
            rpc_url,
            private_key,
            oracle_address,
            enabled,
            gas_limit: gas_limit.unwrap_or(updater.gas_limit),
            update_fee_wei: update_fee_wei.unwrap_or(updater.update_fee_wei),
        })),
        _ => Err(ConfigError::MissingFields {
            chain: display_name,
            fields: Vec::new(),
        }),
    }
}
