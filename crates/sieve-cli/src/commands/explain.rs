use std::path::Path;

use sieve_core::WorkloadDescriptor;
use sieve_filter::{FilterRegistry, NodeFilter};

pub fn explain(registry: &FilterRegistry, workload: &Path) -> anyhow::Result<()> {
    let workload = WorkloadDescriptor::from_file(workload)?;

    for filter in registry.filters() {
        let rendered = filter.render(&workload);
        if !rendered.is_empty() {
            println!("{:<12} {rendered}", filter.name());
        }
    }
    Ok(())
}
