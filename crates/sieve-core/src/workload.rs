//! The placement request handed to the filters.
//!
//! Rules reach a workload two ways: as environment entries prefixed with
//! `constraint:` / `affinity:`, or as JSON lists stored in well-known
//! labels. Both end up as plain rule strings; parsing them is left to the
//! filters so a malformed rule surfaces at match time.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::types::{CONTAINER_NETWORK_PREFIX, HOST_NETWORK, PortMap};

/// Label holding a JSON list of constraint rules.
pub const CONSTRAINTS_LABEL: &str = "com.docker.swarm.constraints";

/// Label holding a JSON list of affinity rules.
pub const AFFINITIES_LABEL: &str = "com.docker.swarm.affinities";

const CONSTRAINT_PREFIX: &str = "constraint:";
const AFFINITY_PREFIX: &str = "affinity:";

/// A workload waiting for a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkloadDescriptor {
    /// Node rules, e.g. `region==us-*`.
    pub constraints: Vec<String>,
    /// Co-location rules, e.g. `image==redis`.
    pub affinities: Vec<String>,
    /// Environment entries that were not rules.
    pub env: Vec<String>,
    pub labels: HashMap<String, String>,
    /// `host`, `bridge`, `container:<name>`, or empty for the default bridge.
    pub network_mode: String,
    pub exposed_ports: BTreeSet<String>,
    pub port_bindings: PortMap,
    /// `<container>[:ro|rw]` entries.
    pub volumes_from: Vec<String>,
    /// `<container>[:alias]` entries.
    pub links: Vec<String>,
}

impl WorkloadDescriptor {
    /// Split `constraint:` and `affinity:` entries out of an environment.
    pub fn from_env<S: AsRef<str>>(env: &[S]) -> Self {
        let mut workload = Self::default();
        for entry in env {
            let entry = entry.as_ref();
            if let Some(rule) = entry.strip_prefix(CONSTRAINT_PREFIX) {
                workload.constraints.push(rule.to_string());
            } else if let Some(rule) = entry.strip_prefix(AFFINITY_PREFIX) {
                workload.affinities.push(rule.to_string());
            } else {
                workload.env.push(entry.to_string());
            }
        }
        workload
    }

    /// Build a workload whose rules come from [`CONSTRAINTS_LABEL`] and
    /// [`AFFINITIES_LABEL`].
    pub fn from_labels(labels: HashMap<String, String>) -> CoreResult<Self> {
        Self::default().with_labels(labels)
    }

    /// Attach labels, appending any rules they carry after the existing ones.
    pub fn with_labels(mut self, labels: HashMap<String, String>) -> CoreResult<Self> {
        self.constraints.extend(rules_from_label(&labels, CONSTRAINTS_LABEL)?);
        self.affinities.extend(rules_from_label(&labels, AFFINITIES_LABEL)?);
        self.labels.extend(labels);
        Ok(self)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn is_host_network(&self) -> bool {
        self.network_mode == HOST_NETWORK
    }

    /// Container whose network namespace this workload joins, if any.
    pub fn network_container(&self) -> Option<&str> {
        self.network_mode.strip_prefix(CONTAINER_NETWORK_PREFIX)
    }
}

fn rules_from_label(labels: &HashMap<String, String>, label: &str) -> CoreResult<Vec<String>> {
    match labels.get(label) {
        Some(raw) => serde_json::from_str(raw).map_err(|source| CoreError::InvalidRuleLabel {
            label: label.to_string(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}
