//! hostscan configuration loading and validation.
//!
//! This crate provides:
//! - The typed [`ScanConfig`] struct backing `config.toml`
//! - Config resolution (CLI → env → XDG → /etc → defaults)
//! - Semantic validation of loaded values

pub mod resolve;
pub mod scan;
pub mod validate;

pub use resolve::{
    load_config_file, load_from_candidates, resolve_config, ConfigCandidates, ConfigSource,
    ResolvedConfig, ENV_CONFIG_PATH,
};
pub use scan::{
    ScanConfig, DEFAULT_DISPLAY_LIMIT, DEFAULT_LOG_FILE, DEFAULT_MAX_LOG_LINES, DEFAULT_SUID_LIMIT,
};
pub use validate::{validate_config, ValidationError, ValidationResult};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid TOML in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}
