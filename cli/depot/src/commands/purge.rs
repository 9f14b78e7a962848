//! `depot purge` — clear every tag in a repository.

use anyhow::Result;

use depot_core::PackageName;
use depot_registry::LocalRegistry;

pub fn run(registry: &mut LocalRegistry, name: &str) -> Result<()> {
    let name = PackageName::parse(name)?;
    registry.purge_tags(&name)?;
    println!("purged tags in {}", name.repository());
    Ok(())
}
