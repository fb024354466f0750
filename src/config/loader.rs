//! Configuration loading from disk and the environment.
//!
//! Precedence, lowest to highest: built-in defaults, the optional TOML file,
//! then command-line / environment overrides.

use std::fs;
use std::path::Path;
use thiserror::Error;
use crate::config::schema::PoolConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line or through environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Comma-separated endpoint URLs (`RPC_LIST`).
    pub rpc_list: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl PoolConfig {
    /// Layer overrides on top of this configuration. An endpoint list that is
    /// present replaces the file's list entirely.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(list) = overrides.rpc_list {
            self.endpoints = parse_endpoint_list(&list);
        }
        if let Some(port) = overrides.port {
            self.listener.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.observability.log_level = level;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.upstream.request_timeout_secs = secs;
        }
    }
}

/// Split a comma-separated endpoint list, trimming whitespace and dropping
/// empty entries.
pub fn parse_endpoint_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Read a TOML configuration file without validating it.
pub fn read_config(path: &Path) -> Result<PoolConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<PoolConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the effective configuration: file (if any), then overrides, then validation.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<PoolConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => PoolConfig::default(),
    };
    config.apply_overrides(overrides);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
