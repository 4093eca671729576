//! sieve-filter — node elimination for the scheduler.
//!
//! Given a workload and every candidate node, the filters decide which
//! nodes the workload may land on. They do NOT rank the survivors; picking
//! one node among them is left to the placement strategy.
//!
//! # Components
//!
//! - **`filter`** — the `NodeFilter` capability and the closed `Filter` set
//! - **`health`**, **`constraint`**, **`affinity`**, **`port`**,
//!   **`dependency`** — the individual filters
//! - **`registry`** — named filters active for this process
//! - **`pipeline`** — folds filters over a node list (logical AND)
//!
//! # Architecture
//!
//! ```text
//! FilterRegistry ──resolve(names)──▶ [Filter]
//!                                      │
//! nodes ──▶ health ──▶ constraint ──▶ … ──▶ survivors
//! ```

pub mod affinity;
pub mod constraint;
pub mod dependency;
pub mod error;
pub mod filter;
pub mod health;
pub mod pipeline;
pub mod port;
pub mod registry;
mod rules;

pub use affinity::AffinityFilter;
pub use constraint::ConstraintFilter;
pub use dependency::DependencyFilter;
pub use error::{FilterError, FilterResult};
pub use filter::{Filter, NodeFilter};
pub use health::HealthFilter;
pub use pipeline::{apply_filter, apply_filters, select_candidates};
pub use port::PortFilter;
pub use registry::FilterRegistry;
