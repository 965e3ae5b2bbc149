//! Oracle price pusher daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   Settings.json / env
//!          │
//!          ▼
//!   ┌──────────────┐      ┌──────────────────────────────────────────────┐
//!   │    config    │─────▶│            multichain orchestrator           │
//!   └──────────────┘      │                                              │
//!                         │  ┌──────────────┐        ┌──────────────┐    │
//!   ┌──────────────┐      │  │ chain updater│  ...   │ chain updater│    │
//!   │    Hermes    │◀─────┼──│  (chain A)   │        │  (chain N)   │    │
//!   │ (attestation)│◀─────┼──└──────┬───────┘        └──────┬───────┘    │
//!   └──────────────┘      └─────────┼───────────────────────┼────────────┘
//!                                   ▼                       ▼
//!                            oracle contract          oracle contract
//!                               (chain A)                (chain N)
//! ```
//!
//! Each updater loops forever: fetch proof → submit → confirm → sleep.

use std::path::PathBuf;

use clap::Parser;

use oracle_pusher::lifecycle::{startup, wait_for_exit_signal, Shutdown};
use oracle_pusher::observability::init_logging;

#[derive(Parser)]
#[command(name = "oracle-pusher")]
#[command(about = "Pushes Pyth price updates to oracle contracts on multiple chains", long_about = None)]
struct Cli {
    /// Settings file (JSON, or TOML by extension).
    #[arg(short, long, env = "PUSHER_CONFIG", default_value = "Settings.json")]
    config: PathBuf,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, env = "PUSHER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Validate configuration and chain bindings, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    tracing::info!("oracle-pusher v{} starting", env!("CARGO_PKG_VERSION"));

    let orchestrator = match startup::load(&cli.config).and_then(|resolved| startup::build(&resolved)) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error during startup");
            return Err(e.into());
        }
    };

    if cli.check {
        tracing::info!(chains = ?orchestrator.chain_labels(), "Configuration check passed");
        return Ok(());
    }

    let shutdown = Shutdown::new();

    tokio::select! {
        _ = orchestrator.run(&shutdown) => {
            tracing::warn!("All chain updaters stopped");
        }
        signal = wait_for_exit_signal() => {
            let signal = signal?;
            tracing::info!(signal = %signal, "Received signal, shutting down");
        }
    }

    Ok(())
}
