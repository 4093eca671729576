//! Applying filters to a node list.
//!
//! Each filter only sees the survivors of the previous one, so the chain is
//! a logical AND. The first error aborts the whole run; no partial
//! candidate list is ever returned.

use sieve_core::{CandidateNode, WorkloadDescriptor};
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::filter::{Filter, NodeFilter};

/// Keep the nodes accepted by a single filter.
pub fn apply_filter<'a, F, N>(
    filter: &F,
    workload: &WorkloadDescriptor,
    nodes: N,
) -> FilterResult<Vec<&'a CandidateNode>>
where
    F: NodeFilter + ?Sized,
    N: IntoIterator<Item = &'a CandidateNode>,
{
    let mut candidates = Vec::new();
    for node in nodes {
        if filter.matches(workload, node)? {
            candidates.push(node);
        }
    }

    debug!(
        filter = filter.name(),
        remaining = candidates.len(),
        "filter applied"
    );
    Ok(candidates)
}

/// Fold every filter over the node list, in order.
pub fn apply_filters<'a, N>(
    filters: &[Filter],
    workload: &WorkloadDescriptor,
    nodes: N,
) -> FilterResult<Vec<&'a CandidateNode>>
where
    N: IntoIterator<Item = &'a CandidateNode>,
{
    let mut candidates: Vec<&'a CandidateNode> = nodes.into_iter().collect();
    for filter in filters {
        candidates = apply_filter(filter, workload, candidates)?;
    }
    Ok(candidates)
}

/// Like [`apply_filters`], but an empty candidate set is an error.
///
/// Stops as soon as a filter leaves no node. When that filter is the health
/// filter the error is [`FilterError::NoHealthyNodeAvailable`]; otherwise it
/// is [`FilterError::NoNodeMatched`].
pub fn select_candidates<'a, N>(
    filters: &[Filter],
    workload: &WorkloadDescriptor,
    nodes: N,
) -> FilterResult<Vec<&'a CandidateNode>>
where
    N: IntoIterator<Item = &'a CandidateNode>,
{
    let mut candidates: Vec<&'a CandidateNode> = nodes.into_iter().collect();
    for filter in filters {
        candidates = apply_filter(filter, workload, candidates)?;
        if candidates.is_empty() {
            return Err(match filter {
                Filter::Health(_) => FilterError::NoHealthyNodeAvailable,
                _ => FilterError::NoNodeMatched(filter.name()),
            });
        }
    }

    if candidates.is_empty() {
        return Err(FilterError::NoHealthyNodeAvailable);
    }
    Ok(candidates)
}
