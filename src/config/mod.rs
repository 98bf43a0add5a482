//! Configuration for eventcheck runs.
//!
//! Configuration is a YAML file (default `eventcheck.yaml`). Every section is
//! optional; missing values fall back to the defaults in [`defaults`].
//! Credentials are never read from the environment here: the bearer token
//! comes from the file or is passed in by the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod defaults;
pub mod validation;

pub use defaults::*;
pub use validation::*;

use crate::validator::RecordValidator;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "eventcheck.yaml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load from an explicit path, or from `eventcheck.yaml` when it exists,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults config
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse config YAML")?
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.lookup.validate()?;
        self.probe.validate()?;
        self.validation.validate()
    }

    /// Record validator using this config's normalizer table.
    pub fn record_validator(&self) -> Result<RecordValidator> {
        Ok(RecordValidator::new(self.validation.normalizer_table()?))
    }
}
