use std::path::Path;

use sieve_core::SieveConfig;
use sieve_filter::FilterRegistry;
use tracing::info;

pub mod explain;
pub mod filter;
pub mod list;

/// Build the process-wide registry from `sieve.toml`, or the defaults.
pub fn load_registry(config: Option<&Path>) -> anyhow::Result<FilterRegistry> {
    let config = match config {
        Some(path) => {
            let config = SieveConfig::from_file(path)?;
            info!(path = %path.display(), "configuration loaded");
            config
        }
        None => SieveConfig::default(),
    };

    let registry = FilterRegistry::from_config(&config.filters)?;
    info!(filters = ?registry.list_available(), "filter registry initialized");
    Ok(registry)
}
