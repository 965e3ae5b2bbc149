//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required-field checks for enabled chains
//! - Validate value ranges (timeouts > 0, retries > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: no network, no environment access

use thiserror::Error;

use crate::config::schema::{AttestationConfig, SettingsFile, UpdaterConfig};

/// A semantic problem in the tuning sections of the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A duration or count that must be positive was zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// No price feeds to request.
    #[error("attestation.priceFeedIds must not be empty")]
    EmptyFeedList,

    /// Attestation endpoint is not a valid URL.
    #[error("attestation.endpoint '{0}' is not a valid URL")]
    InvalidEndpoint(String),
}

/// Required per-chain fields, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 5] = ["chainId", "chainName", "rpcUrl", "privateKey", "oracleAddress"];

/// Candidate values for the required fields of one chain, after env overrides.
#[derive(Debug, Default)]
pub struct RequiredValues<'a> {
    pub chain_id: Option<u64>,
    pub chain_name: Option<&'a str>,
    pub rpc_url: Option<&'a str>,
    pub private_key: Option<&'a str>,
    pub oracle_address: Option<&'a str>,
}

/// List the required fields that are absent or blank.
pub fn missing_fields(values: &RequiredValues<'_>) -> Vec<&'static str> {
    let present = [
        values.chain_id.is_some(),
        is_present(values.chain_name),
        is_present(values.rpc_url),
        is_present(values.private_key),
        is_present(values.oracle_address),
    ];

    REQUIRED_FIELDS
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect()
}

fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Validate the global tuning sections of a settings file.
pub fn validate_settings(settings: &SettingsFile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_updater(&settings.updater, &mut errors);
    validate_attestation(&settings.attestation, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_updater(config: &UpdaterConfig, errors: &mut Vec<ValidationError>) {
    if config.update_interval_secs == 0 {
        errors.push(ValidationError::Zero("updater.updateIntervalSecs"));
    }
    if config.max_retries == 0 {
        errors.push(ValidationError::Zero("updater.maxRetries"));
    }
    if config.tx_timeout_secs == 0 {
        errors.push(ValidationError::Zero("updater.txTimeoutSecs"));
    }
    if config.receipt_poll_ms == 0 {
        errors.push(ValidationError::Zero("updater.receiptPollMs"));
    }
}

fn validate_attestation(config: &AttestationConfig, errors: &mut Vec<ValidationError>) {
    if config.timeout_secs == 0 {
        errors.push(ValidationError::Zero("attestation.timeoutSecs"));
    }
    if config.price_feed_ids.is_empty() {
        errors.push(ValidationError::EmptyFeedList);
    }
    if config.endpoint.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidEndpoint(config.endpoint.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_reports_blank_values() {
        let values = RequiredValues {
            chain_id: Some(1),
            chain_name: Some("Ethereum"),
            rpc_url: Some("  "),
            private_key: Some("0xabc"),
            oracle_address: None,
        };
        assert_eq!(missing_fields(&values), vec!["rpcUrl", "oracleAddress"]);
    }

    #[test]
    fn test_complete_values_have_no_missing_fields() {
        let values = RequiredValues {
            chain_id: Some(137),
            chain_name: Some("Polygon"),
            rpc_url: Some("http://localhost:8545"),
            private_key: Some("0xabc"),
            oracle_address: Some("0x01"),
        };
        assert!(missing_fields(&values).is_empty());
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&SettingsFile::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut settings = SettingsFile::default();
        settings.updater.max_retries = 0;
        settings.updater.tx_timeout_secs = 0;
        settings.attestation.price_feed_ids.clear();
        settings.attestation.endpoint = "not a url".to_string();

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero("updater.maxRetries")));
        assert!(errors.contains(&ValidationError::EmptyFeedList));
    }
}
