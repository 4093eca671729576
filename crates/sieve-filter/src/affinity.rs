//! Co-location with containers, images, or container labels.
//!
//! | key         | candidates                                               |
//! |-------------|----------------------------------------------------------|
//! | `container` | every container id and name (leading `/` stripped)      |
//! | `image`     | every image id, full repo tag, and repository name      |
//! | other       | that label on every container, `""` when it is missing  |

use std::iter;

use sieve_core::{CandidateNode, WorkloadDescriptor};
use sieve_expr::parse_exprs;

use crate::error::FilterResult;
use crate::filter::NodeFilter;
use crate::rules::{all_satisfied, render_rules};

const CONTAINER_KEY: &str = "container";
const IMAGE_KEY: &str = "image";

/// Selects only nodes based on what already runs or is stored on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AffinityFilter;

impl NodeFilter for AffinityFilter {
    fn name(&self) -> &'static str {
        "affinity"
    }

    fn matches(&self, workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool> {
        let affinities = parse_exprs(&workload.affinities)?;

        Ok(all_satisfied(self.name(), node, &affinities, |affinity| {
            match affinity.key.as_str() {
                CONTAINER_KEY => affinity.matches(
                    node.containers
                        .iter()
                        .flat_map(|c| iter::once(c.id.as_str()).chain(c.short_names())),
                ),
                IMAGE_KEY => affinity.matches(node.images.iter().flat_map(|image| {
                    iter::once(image.id.as_str())
                        .chain(image.repo_tags.iter().map(String::as_str))
                        .chain(image.repositories())
                })),
                key => affinity.matches(
                    node.containers
                        .iter()
                        .map(|c| c.labels.get(key).map(String::as_str).unwrap_or_default()),
                ),
            }
        }))
    }

    fn render(&self, workload: &WorkloadDescriptor) -> String {
        render_rules(self.name(), &workload.affinities, "affinity:")
    }
}
