//! `depot tag` — point a new reference at an existing artifact.

use anyhow::Result;

use depot_core::PackageName;
use depot_registry::LocalRegistry;

pub fn run(registry: &mut LocalRegistry, source: &str, target: &str) -> Result<()> {
    let source = PackageName::parse(source)?;
    let target = PackageName::parse(target)?;
    registry.tag(&source, &target)?;
    println!("tagged {source} as {target}");
    Ok(())
}
