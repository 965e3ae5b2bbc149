//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON/TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs (shape detection: Legacy | Multichain)
//!     → resolver.rs (env overrides, legacy migration, enabled filter)
//!     → validation.rs (required fields, value ranges)
//!     → ResolvedConfig (validated, immutable)
//!     → consumed once by the orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once at startup; no hot reload
//! - All tuning fields have defaults to allow minimal configs
//! - Environment lookups are injected so resolution stays pure in tests

pub mod loader;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use resolver::{resolve, resolve_with_env, ChainDescriptor, ResolvedConfig};
pub use schema::{AttestationConfig, ChainEntry, ConfigShape, ObservabilityConfig, SettingsFile, UpdaterConfig};
