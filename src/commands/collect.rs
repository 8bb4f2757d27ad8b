use crate::config::{Config, Domain};
use crate::hardware::{run_collection, Sources};

pub fn handle_collect_command(config: &Config, only: &[Domain]) -> anyhow::Result<()> {
    let domains = if only.is_empty() { &config.domains[..] } else { only };
    let sources = Sources::from_config(config);
    run_collection(&sources, domains);
    Ok(())
}
