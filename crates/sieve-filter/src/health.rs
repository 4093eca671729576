//! Liveness gate.

use sieve_core::{CandidateNode, WorkloadDescriptor};

use crate::error::FilterResult;
use crate::filter::NodeFilter;

/// Only schedules workloads on healthy nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthFilter;

impl NodeFilter for HealthFilter {
    fn name(&self) -> &'static str {
        "health"
    }

    fn matches(&self, _workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool> {
        Ok(node.is_healthy)
    }

    fn render(&self, _workload: &WorkloadDescriptor) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_iff_healthy() {
        let workload = WorkloadDescriptor::default();

        let mut unhealthy = CandidateNode::new("node-0-id", "node-0-name");
        unhealthy.is_healthy = false;
        let healthy = CandidateNode::new("node-1-id", "node-1-name");

        assert!(!HealthFilter.matches(&workload, &unhealthy).unwrap());
        assert!(HealthFilter.matches(&workload, &healthy).unwrap());
    }

    #[test]
    fn ignores_workload_rules() {
        let workload = WorkloadDescriptor::from_env(&["constraint:not a rule"]);
        let node = CandidateNode::new("n", "n");

        assert!(HealthFilter.matches(&workload, &node).unwrap());
        assert_eq!(HealthFilter.render(&workload), "");
    }
}
