//! `depot rm` — batch artifact removal, non-fatal per item.

use anyhow::Result;

use depot_core::PackageName;
use depot_registry::{LocalRegistry, RemoveOutcome};

pub fn run(registry: &mut LocalRegistry, names: &[String]) -> Result<()> {
    let names = names
        .iter()
        .map(|n| PackageName::parse(n))
        .collect::<Result<Vec<_>, _>>()?;

    for outcome in registry.remove(&names)? {
        match outcome {
            RemoveOutcome::Removed { id, .. } => println!("{id}"),
            RemoveOutcome::NotFound { reference } => println!("{reference} not found"),
        }
    }
    Ok(())
}
