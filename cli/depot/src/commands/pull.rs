//! `depot pull` — fetch an artifact from the remote registry and
//! register it locally.

use anyhow::Result;

use depot_core::PackageName;
use depot_registry::{Credentials, HttpTransport, LocalRegistry};

use crate::config::ClientConfig;

pub fn run(
    registry: &mut LocalRegistry,
    config: &ClientConfig,
    name: &str,
    user: Option<&str>,
    insecure: bool,
) -> Result<()> {
    let name = PackageName::parse(name)?;
    let transport = HttpTransport::new(&config.transport(insecure)?)?;
    let credentials = user.map(Credentials::parse);

    let id = registry.pull(&name, &transport, credentials.as_ref())?;
    println!("pulled {name} ({})", &id[..19]);
    Ok(())
}
