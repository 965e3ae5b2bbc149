//! Metrics collection and exposition.
//!
//! # Metrics
//! - `oracle_updates_total` (counter): finished cycles by chain, outcome
//! - `oracle_update_attempts_total` (counter): attempts by chain
//! - `oracle_last_update_timestamp_seconds` (gauge): last successful update by chain
//!
//! # Design Decisions
//! - Recording is always on; without an installed exporter it is a no-op
//! - The Prometheus exporter runs only when an address is configured

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| e.to_string())?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Outcome label for a finished cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Success,
    Exhausted,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleOutcome::Success => "success",
            CycleOutcome::Exhausted => "exhausted",
        }
    }
}

/// Record one attempt within a cycle.
pub fn record_attempt(chain: &str) {
    ::metrics::counter!("oracle_update_attempts_total", "chain" => chain.to_string()).increment(1);
}

/// Record a finished cycle.
pub fn record_cycle(chain: &str, outcome: CycleOutcome) {
    ::metrics::counter!(
        "oracle_updates_total",
        "chain" => chain.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    if outcome == CycleOutcome::Success {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        ::metrics::gauge!("oracle_last_update_timestamp_seconds", "chain" => chain.to_string()).set(now);
    }
}
