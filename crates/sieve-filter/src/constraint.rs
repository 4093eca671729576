//! Node identity and label constraints.
//!
//! `node==<id-or-name>` pins a workload to one machine; any other key is
//! matched against the node label of that name (an absent label reads as
//! the empty string).

use sieve_core::{CandidateNode, WorkloadDescriptor};
use sieve_expr::parse_exprs;

use crate::error::FilterResult;
use crate::filter::NodeFilter;
use crate::rules::{all_satisfied, render_rules};

/// Key matched against the node's id and name instead of a label.
const NODE_KEY: &str = "node";

/// Selects only nodes whose identity and labels satisfy every constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintFilter;

impl NodeFilter for ConstraintFilter {
    fn name(&self) -> &'static str {
        "constraint"
    }

    fn matches(&self, workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool> {
        // Rules are parsed again for every node.
        let constraints = parse_exprs(&workload.constraints)?;

        Ok(all_satisfied(self.name(), node, &constraints, |constraint| {
            match constraint.key.as_str() {
                NODE_KEY => constraint.matches([node.id.as_str(), node.name.as_str()]),
                key => constraint.matches([node.label(key)]),
            }
        }))
    }

    fn render(&self, workload: &WorkloadDescriptor) -> String {
        render_rules(self.name(), &workload.constraints, "")
    }
}
