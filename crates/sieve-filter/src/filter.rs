//! The filter capability and the closed set of filters.

use std::fmt;

use sieve_core::{CandidateNode, WorkloadDescriptor};

use crate::affinity::AffinityFilter;
use crate::constraint::ConstraintFilter;
use crate::dependency::DependencyFilter;
use crate::error::FilterResult;
use crate::health::HealthFilter;
use crate::port::PortFilter;

/// A node eligibility predicate.
pub trait NodeFilter {
    /// Name used to select the filter.
    fn name(&self) -> &'static str;

    /// Returns true if the node is acceptable for the workload.
    ///
    /// Errors (e.g. a rule that does not parse) abort the whole filtering
    /// attempt; they are never treated as a non-match.
    fn matches(&self, workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool>;

    /// CLI-style rendering of what this filter reads from the workload, or
    /// an empty string. Never fails; problems are logged.
    fn render(&self, workload: &WorkloadDescriptor) -> String;
}

/// Every filter Sieve knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Health(HealthFilter),
    Constraint(ConstraintFilter),
    Affinity(AffinityFilter),
    Port(PortFilter),
    Dependency(DependencyFilter),
}

impl Filter {
    /// All filters in their canonical order.
    pub fn all() -> [Filter; 5] {
        [
            Filter::Health(HealthFilter),
            Filter::Constraint(ConstraintFilter),
            Filter::Affinity(AffinityFilter),
            Filter::Port(PortFilter),
            Filter::Dependency(DependencyFilter),
        ]
    }

    pub fn from_name(name: &str) -> Option<Filter> {
        Filter::all().into_iter().find(|filter| filter.name() == name)
    }
}

impl NodeFilter for Filter {
    fn name(&self) -> &'static str {
        match self {
            Filter::Health(f) => f.name(),
            Filter::Constraint(f) => f.name(),
            Filter::Affinity(f) => f.name(),
            Filter::Port(f) => f.name(),
            Filter::Dependency(f) => f.name(),
        }
    }

    fn matches(&self, workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool> {
        match self {
            Filter::Health(f) => f.matches(workload, node),
            Filter::Constraint(f) => f.matches(workload, node),
            Filter::Affinity(f) => f.matches(workload, node),
            Filter::Port(f) => f.matches(workload, node),
            Filter::Dependency(f) => f.matches(workload, node),
        }
    }

    fn render(&self, workload: &WorkloadDescriptor) -> String {
        match self {
            Filter::Health(f) => f.render(workload),
            Filter::Constraint(f) => f.render(workload),
            Filter::Affinity(f) => f.render(workload),
            Filter::Port(f) => f.render(workload),
            Filter::Dependency(f) => f.render(workload),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_stable() {
        let names: Vec<_> = Filter::all().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["health", "constraint", "affinity", "port", "dependency"]);
    }

    #[test]
    fn from_name_finds_each_filter() {
        for filter in Filter::all() {
            assert_eq!(Filter::from_name(filter.name()), Some(filter));
        }
        assert_eq!(Filter::from_name("Health"), None);
        assert_eq!(Filter::from_name("unknown"), None);
    }

    #[test]
    fn dispatch_reaches_the_variant() {
        let mut node = CandidateNode::new("n1", "n1");
        node.is_healthy = false;
        let workload = WorkloadDescriptor::default();

        let health = Filter::Health(HealthFilter);
        assert!(!health.matches(&workload, &node).unwrap());
        assert!(Filter::Constraint(ConstraintFilter).matches(&workload, &node).unwrap());
        assert_eq!(health.to_string(), "health");
    }
}
