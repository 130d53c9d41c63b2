//! Run configuration for the multiverse driver.
//!
//! All settings are loaded from a TOML configuration file. The `[model]`
//! table carries the model overrides shared by every reality.

use ideology_core::{ConfigError, ModelConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default run configuration file path
pub const DEFAULT_RUN_CONFIG_PATH: &str = "multiverse.toml";

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Agents per reality
    pub agents: usize,
    /// Steps per reality
    pub steps: u64,
    /// Seed of reality 0; reality `i` uses `seed + i`
    pub seed: u64,
    /// Number of independent realities
    pub realities: u32,
    /// Record a snapshot every this many steps (the final step is always recorded)
    pub sample_every: u64,
    /// Model overrides shared by all realities
    pub model: ModelConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            agents: 5000,
            steps: 120,
            seed: 42,
            realities: 1,
            sample_every: 1,
            model: ModelConfig::default(),
        }
    }
}

impl RunConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Loads `path` if it exists, otherwise warns and returns the defaults.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        warn!("{} not found. Using defaults.", path.display());
        Ok(Self::default())
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
