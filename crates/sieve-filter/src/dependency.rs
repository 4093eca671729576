//! Co-scheduling of dependent containers.

use sieve_core::{CandidateNode, WorkloadDescriptor};
use tracing::debug;

use crate::error::FilterResult;
use crate::filter::NodeFilter;

/// Requires every container the workload shares volumes with, links to,
/// or joins the network of to already run on the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyFilter;

impl NodeFilter for DependencyFilter {
    fn name(&self) -> &'static str {
        "dependency"
    }

    fn matches(&self, workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool> {
        for dependency in dependencies(workload) {
            if !node.contains_container(dependency) {
                debug!(node = %node.id, dependency, "dependency not on node");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn render(&self, workload: &WorkloadDescriptor) -> String {
        let volumes = workload
            .volumes_from
            .iter()
            .map(|volume| format!("--volumes-from={volume}"));
        let links = workload.links.iter().map(|link| format!("--link={link}"));
        let net = workload
            .network_container()
            .map(|_| format!("--net={}", workload.network_mode));

        volumes.chain(links).chain(net).collect::<Vec<_>>().join(" ")
    }
}

/// Container names referenced by the workload, in declaration order.
fn dependencies(workload: &WorkloadDescriptor) -> impl Iterator<Item = &str> {
    workload
        .volumes_from
        .iter()
        .chain(&workload.links)
        .map(|entry| first_segment(entry))
        .chain(workload.network_container())
}

/// `db:ro` → `db`, `db:alias` → `db`.
fn first_segment(entry: &str) -> &str {
    entry.split_once(':').map_or(entry, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_core::Container;

    fn node(containers: &[(&str, &str)]) -> CandidateNode {
        let mut node = CandidateNode::new("node-1", "node-1");
        node.containers = containers
            .iter()
            .map(|(id, name)| Container {
                names: vec![format!("/{name}")],
                ..Container::new(*id)
            })
            .collect();
        node
    }

    #[test]
    fn no_dependencies_always_match() {
        let workload = WorkloadDescriptor::default();
        assert!(DependencyFilter.matches(&workload, &node(&[])).unwrap());
    }

    #[test]
    fn volumes_from() {
        let workload = WorkloadDescriptor {
            volumes_from: vec!["data:ro".to_string()],
            ..Default::default()
        };
        assert!(DependencyFilter.matches(&workload, &node(&[("c1", "data")])).unwrap());
        assert!(!DependencyFilter.matches(&workload, &node(&[("c1", "other")])).unwrap());
    }

    #[test]
    fn links_by_name_or_id() {
        let workload = WorkloadDescriptor {
            links: vec!["db:database".to_string(), "abc123".to_string()],
            ..Default::default()
        };
        assert!(DependencyFilter.matches(&workload, &node(&[("abc123", "x"), ("d1", "db")])).unwrap());
        assert!(!DependencyFilter.matches(&workload, &node(&[("d1", "db")])).unwrap());
    }

    #[test]
    fn network_container() {
        let workload = WorkloadDescriptor {
            network_mode: "container:web".to_string(),
            ..Default::default()
        };
        assert!(DependencyFilter.matches(&workload, &node(&[("w1", "web")])).unwrap());
        assert!(!DependencyFilter.matches(&workload, &node(&[])).unwrap());

        let bridge = WorkloadDescriptor {
            network_mode: "bridge".to_string(),
            ..Default::default()
        };
        assert!(DependencyFilter.matches(&bridge, &node(&[])).unwrap());
    }

    #[test]
    fn every_dependency_is_required() {
        let workload = WorkloadDescriptor {
            volumes_from: vec!["data".to_string()],
            links: vec!["db".to_string()],
            network_mode: "container:web".to_string(),
            ..Default::default()
        };
        let all = node(&[("1", "data"), ("2", "db"), ("3", "web")]);
        let missing_db = node(&[("1", "data"), ("3", "web")]);

        assert!(DependencyFilter.matches(&workload, &all).unwrap());
        assert!(!DependencyFilter.matches(&workload, &missing_db).unwrap());
    }

    #[test]
    fn render_lists_dependencies() {
        let workload = WorkloadDescriptor {
            volumes_from: vec!["data:ro".to_string()],
            links: vec!["db:database".to_string()],
            network_mode: "container:web".to_string(),
            ..Default::default()
        };
        assert_eq!(
            DependencyFilter.render(&workload),
            "--volumes-from=data:ro --link=db:database --net=container:web"
        );
        assert_eq!(DependencyFilter.render(&WorkloadDescriptor::default()), "");
    }
}
