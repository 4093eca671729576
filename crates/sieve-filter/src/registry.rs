//! The set of filters available to a scheduler instance.
//!
//! Built once at startup (from `sieve.toml` or the defaults) and read-only
//! afterwards. Callers select filters from it by name.

use sieve_core::FiltersConfig;
use sieve_core::config::DEFAULT_FILTERS;
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::filter::{Filter, NodeFilter};
use crate::health::HealthFilter;

/// Ordered list of active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRegistry {
    filters: Vec<Filter>,
}

impl Default for FilterRegistry {
    /// Health and constraint only.
    fn default() -> Self {
        Self::new(DEFAULT_FILTERS.iter().filter_map(|name| Filter::from_name(name)).collect())
    }
}

impl FilterRegistry {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// Registry exposing every filter, optional ones included.
    pub fn all() -> Self {
        Self::new(Filter::all().to_vec())
    }

    /// Build the registry from the `[filters]` section of the config.
    ///
    /// Health is always registered, first, even when the config leaves it out.
    pub fn from_config(config: &FiltersConfig) -> FilterResult<Self> {
        let mut filters = config
            .enabled
            .iter()
            .map(|name| Filter::from_name(name).ok_or_else(|| FilterError::NotSupported(name.clone())))
            .collect::<FilterResult<Vec<_>>>()?;
        if !filters.iter().any(|filter| matches!(filter, Filter::Health(_))) {
            debug!("health filter not configured, registering it");
            filters.insert(0, Filter::Health(HealthFilter));
        }
        Ok(Self::new(filters))
    }

    pub fn get(&self, name: &str) -> Option<Filter> {
        self.filters.iter().copied().find(|filter| filter.name() == name)
    }

    /// Select filters by name, in the requested order.
    ///
    /// Fails on the first name that is not registered.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> FilterResult<Vec<Filter>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let filter = self
                    .get(name)
                    .ok_or_else(|| FilterError::NotSupported(name.to_string()))?;
                debug!(name, "initializing filter");
                Ok(filter)
            })
            .collect()
    }

    /// Names of all registered filters, in registry order.
    pub fn list_available(&self) -> Vec<&'static str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}
