//! Cluster-side types read by the filters.
//!
//! A [`CandidateNode`] is a snapshot owned by the node registry. Filters
//! only ever borrow it; nothing here is mutated during filtering.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Unique identifier for a node in the cluster.
pub type NodeId = String;

/// Container port (e.g. `80/tcp`) → host bindings for that port.
pub type PortMap = BTreeMap<String, Vec<PortBinding>>;

/// Network mode that shares the node's network namespace.
pub const HOST_NETWORK: &str = "host";

/// Prefix of a network mode that joins another container's namespace.
pub const CONTAINER_NETWORK_PREFIX: &str = "container:";

// ── Ports ─────────────────────────────────────────────────────────

/// A single host-side binding of a container port.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortBinding {
    /// Host interface. Empty or `0.0.0.0` means every interface.
    #[serde(default)]
    pub host_ip: String,
    /// Host port. Empty when the runtime picks one.
    #[serde(default)]
    pub host_port: String,
}

impl PortBinding {
    pub fn new(host_ip: impl Into<String>, host_port: impl Into<String>) -> Self {
        Self {
            host_ip: host_ip.into(),
            host_port: host_port.into(),
        }
    }

    /// Binding on every interface shadows any concrete IP on the same port.
    pub fn binds_all_interfaces(&self) -> bool {
        self.host_ip.is_empty() || self.host_ip == "0.0.0.0"
    }
}

// ── Containers and images ─────────────────────────────────────────

/// A container already scheduled on a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Container {
    pub id: String,
    /// Names as reported by the runtime, usually with a leading `/`.
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub network_mode: String,
    #[serde(default)]
    pub exposed_ports: BTreeSet<String>,
    /// Bindings requested at creation time.
    #[serde(default)]
    pub port_bindings: PortMap,
    /// Bindings reported by the runtime. Empty for stopped containers.
    #[serde(default)]
    pub runtime_ports: PortMap,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Names with the leading `/` removed.
    pub fn short_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(|name| name.strip_prefix('/').unwrap_or(name))
    }

    pub fn is_host_network(&self) -> bool {
        self.network_mode == HOST_NETWORK
    }
}

/// An image present on a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub id: String,
    /// Full references such as `registry:5000/app:1.2`.
    #[serde(default)]
    pub repo_tags: Vec<String>,
}

impl Image {
    /// Repository part of every tag (`app:1.2` → `app`).
    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.repo_tags.iter().map(|tag| repository_of(tag))
    }
}

/// Strip the tag from an image reference.
///
/// Splits at the last `:` unless what follows it contains a `/`, in which
/// case the colon belongs to a registry port and there is no tag.
pub fn repository_of(reference: &str) -> &str {
    match reference.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => repo,
        _ => reference,
    }
}

// ── Node ──────────────────────────────────────────────────────────

/// One cluster machine eligible for placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateNode {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub is_healthy: bool,
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl CandidateNode {
    /// A healthy node with no labels, containers or images.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            labels: HashMap::new(),
            is_healthy: true,
            containers: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Label value, or the empty string when the label is absent.
    pub fn label(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Look up a container by id, name, or unambiguous id prefix.
    pub fn container(&self, id_or_name: &str) -> Option<&Container> {
        if id_or_name.is_empty() {
            return None;
        }

        if let Some(container) = self.containers.iter().find(|c| c.id == id_or_name) {
            return Some(container);
        }

        let name = id_or_name.strip_prefix('/').unwrap_or(id_or_name);
        if let Some(container) = self
            .containers
            .iter()
            .find(|c| c.short_names().any(|n| n == name))
        {
            return Some(container);
        }

        let mut by_prefix = self
            .containers
            .iter()
            .filter(|c| c.id.starts_with(id_or_name));
        match (by_prefix.next(), by_prefix.next()) {
            (Some(container), None) => Some(container),
            _ => None,
        }
    }

    pub fn contains_container(&self, id_or_name: &str) -> bool {
        self.container(id_or_name).is_some()
    }
}

/// Every node known to the scheduler at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClusterSnapshot {
    pub nodes: Vec<CandidateNode>,
}

impl ClusterSnapshot {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
