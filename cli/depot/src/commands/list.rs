//! `depot list` — tabular or quiet artifact listing.

use anyhow::Result;

use depot_registry::{format_table, LocalRegistry};

pub fn run(registry: &LocalRegistry, quiet: bool) -> Result<()> {
    if quiet {
        for id in registry.list_quiet() {
            println!("{id}");
        }
    } else {
        print!("{}", format_table(&registry.list()));
    }
    Ok(())
}
