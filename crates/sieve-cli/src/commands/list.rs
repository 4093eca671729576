use sieve_filter::FilterRegistry;

pub fn list(registry: &FilterRegistry) -> anyhow::Result<()> {
    for name in registry.list_available() {
        println!("{name}");
    }
    Ok(())
}
