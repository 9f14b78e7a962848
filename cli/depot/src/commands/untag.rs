//! `depot untag` — remove one tag, leaving the artifact record.

use anyhow::Result;

use depot_core::PackageName;
use depot_registry::LocalRegistry;

pub fn run(registry: &mut LocalRegistry, name: &str) -> Result<()> {
    let name = PackageName::parse(name)?;
    registry.untag(&name)?;
    println!("untagged {name}");
    Ok(())
}
