//! `depot add` — register a packaged artifact and its seal.

use std::path::Path;

use anyhow::{Context, Result};

use depot_core::{PackageName, Seal};
use depot_registry::LocalRegistry;

/// Add `file` (with its companion seal document beside it) to the
/// registry under the given reference.
pub fn run(registry: &mut LocalRegistry, file: &Path, name: &str) -> Result<()> {
    let name = PackageName::parse(name)?;
    let seal_path = file.with_extension("json");
    let seal = Seal::from_file(&seal_path)
        .with_context(|| format!("reading seal {}", seal_path.display()))?;

    let id = registry.add(file, &name, &seal)?;
    println!("added {name} ({})", &id[..19]);
    Ok(())
}
