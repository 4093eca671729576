use std::path::Path;

use sieve_core::{CandidateNode, ClusterSnapshot, WorkloadDescriptor};
use sieve_filter::{Filter, FilterRegistry, HealthFilter, select_candidates};
use tracing::info;

pub fn filter(
    registry: &FilterRegistry,
    cluster: &Path,
    workload: &Path,
    names: &[String],
    format: &str,
) -> anyhow::Result<()> {
    let snapshot = ClusterSnapshot::from_file(cluster)?;
    let workload = WorkloadDescriptor::from_file(workload)?;

    let survivors = select(registry, &snapshot, &workload, names)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&survivors)?);
        }
        _ => {
            for node in survivors {
                println!("{}\t{}", node.id, node.name);
            }
        }
    }

    Ok(())
}

/// Run the requested filters (or every active one) over the snapshot.
///
/// Unhealthy nodes are always dropped, whichever filters were named.
fn select<'a>(
    registry: &FilterRegistry,
    snapshot: &'a ClusterSnapshot,
    workload: &WorkloadDescriptor,
    names: &[String],
) -> anyhow::Result<Vec<&'a CandidateNode>> {
    let mut filters = if names.is_empty() {
        registry.filters().to_vec()
    } else {
        registry.resolve(names)?
    };
    if !filters.iter().any(|filter| matches!(filter, Filter::Health(_))) {
        filters.insert(0, Filter::Health(HealthFilter));
    }

    info!(
        nodes = snapshot.nodes.len(),
        filters = filters.len(),
        "filtering cluster"
    );

    let survivors = select_candidates(&filters, workload, &snapshot.nodes)?;
    info!(candidates = survivors.len(), "filtering complete");
    Ok(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ClusterSnapshot {
        let mut healthy = CandidateNode::new("n1", "worker-1");
        healthy.labels.insert("region".to_string(), "eu".to_string());
        let mut down = CandidateNode::new("n2", "worker-2");
        down.is_healthy = false;
        ClusterSnapshot {
            nodes: vec![healthy, down, CandidateNode::new("n3", "worker-3")],
        }
    }

    fn ids(nodes: &[&CandidateNode]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn uses_every_active_filter_by_default() {
        let snapshot = snapshot();
        let workload = WorkloadDescriptor::from_env(&["constraint:region==eu"]);

        let survivors = select(&FilterRegistry::default(), &snapshot, &workload, &[]).unwrap();
        assert_eq!(ids(&survivors), vec!["n1"]);
    }

    #[test]
    fn explicit_filter_list() {
        let snapshot = snapshot();
        let workload = WorkloadDescriptor::default();

        let survivors = select(
            &FilterRegistry::default(),
            &snapshot,
            &workload,
            &["constraint".to_string()],
        )
        .unwrap();
        assert_eq!(ids(&survivors), vec!["n1", "n3"]);
    }

    #[test]
    fn unmatched_rules_are_an_error() {
        let snapshot = snapshot();
        let workload = WorkloadDescriptor::from_env(&["constraint:region==us"]);

        let err = select(&FilterRegistry::default(), &snapshot, &workload, &[]).unwrap_err();
        assert_eq!(err.to_string(), "no node matched the constraint filter");
    }

    #[test]
    fn unhealthy_cluster_is_an_error() {
        let mut snapshot = snapshot();
        for node in &mut snapshot.nodes {
            node.is_healthy = false;
        }

        let err = select(
            &FilterRegistry::default(),
            &snapshot,
            &WorkloadDescriptor::default(),
            &["constraint".to_string()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("no healthy node"));
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let snapshot = snapshot();
        let workload = WorkloadDescriptor::default();

        let err = select(
            &FilterRegistry::default(),
            &snapshot,
            &workload,
            &["port".to_string()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("filter not supported"));
    }

    #[test]
    fn reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let cluster = dir.path().join("cluster.json");
        let workload = dir.path().join("workload.json");
        std::fs::write(&cluster, serde_json::to_string(&snapshot()).unwrap()).unwrap();
        std::fs::write(&workload, r#"{ "constraints": ["node==worker-3"] }"#).unwrap();

        filter(&FilterRegistry::default(), &cluster, &workload, &[], "json").unwrap();
    }
}
