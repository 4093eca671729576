//! sieve-core — shared types for the Sieve node filters.
//!
//! - **`types`** — candidate nodes as seen by the scheduler (labels,
//!   containers, images, port bindings)
//! - **`workload`** — the placement request and its rule sets
//! - **`config`** — `sieve.toml` parsing

pub mod config;
pub mod error;
pub mod types;
pub mod workload;

pub use config::{FiltersConfig, SieveConfig};
pub use error::{CoreError, CoreResult};
pub use types::*;
pub use workload::WorkloadDescriptor;
