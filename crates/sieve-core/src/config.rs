//! sieve.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filters active when no configuration says otherwise.
pub const DEFAULT_FILTERS: [&str; 2] = ["health", "constraint"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SieveConfig {
    #[serde(default)]
    pub filters: FiltersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiltersConfig {
    /// Names of the filters registered at startup, in evaluation order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> Vec<String> {
    DEFAULT_FILTERS.iter().map(|name| name.to_string()).collect()
}

impl SieveConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SieveConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
