//! `depot push` — upload an artifact to the remote registry.

use anyhow::Result;

use depot_core::PackageName;
use depot_registry::{Credentials, HttpTransport, LocalRegistry};

use crate::config::ClientConfig;

pub fn run(
    registry: &LocalRegistry,
    config: &ClientConfig,
    name: &str,
    user: Option<&str>,
    insecure: bool,
) -> Result<()> {
    let name = PackageName::parse(name)?;
    let transport = HttpTransport::new(&config.transport(insecure)?)?;
    let credentials = user.map(Credentials::parse);

    registry.push(&name, &transport, credentials.as_ref())?;
    println!("pushed {name}");
    Ok(())
}
