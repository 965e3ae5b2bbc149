//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::SettingsFile;
use crate::config::validation::ValidationError;

/// Error type for configuration loading and resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// An enabled chain lacks required fields.
    #[error("chain '{chain}' is missing required fields: {}", .fields.join(", "))]
    MissingFields {
        chain: String,
        fields: Vec<&'static str>,
    },

    #[error("no enabled chains")]
    NoEnabledChains,

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Pick the format from the file extension; JSON unless the file ends in `.toml`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }
}

/// Read a settings file.
///
/// A missing file yields an empty [`SettingsFile`] so that a deployment can be
/// configured from environment variables alone.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Settings file not found, relying on environment");
        return Ok(SettingsFile::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_settings(&content, FileFormat::from_path(path)).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse settings text in the given format.
pub fn parse_settings(content: &str, format: FileFormat) -> Result<SettingsFile, String> {
    if content.trim().is_empty() {
        return Ok(SettingsFile::default());
    }

    match format {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}
