//! Client configuration: `config.toml` in the registry root.
//!
//! Holds everything the CLI needs beyond the index itself — the remote
//! registry endpoint and how to talk to it. All fields are optional;
//! a missing file means defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use depot_registry::TransportConfig;

/// `config.toml` contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote registry, e.g. `https://depot.example.com`.
    #[serde(default)]
    pub remote: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Disable TLS certificate validation for the remote. Off by
    /// default; the `--insecure` flag overrides per invocation.
    #[serde(default)]
    pub insecure: bool,
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            remote: None,
            timeout_secs: default_timeout(),
            insecure: false,
        }
    }
}

impl ClientConfig {
    /// Load `config.toml` from the registry root; defaults when the
    /// file does not exist.
    pub fn load(registry_root: &Path) -> Result<Self> {
        let path = registry_root.join("config.toml");
        if !path.is_file() {
            return Ok(ClientConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Build the transport configuration, with the CLI `--insecure`
    /// flag overriding the file value.
    pub fn transport(&self, insecure_flag: bool) -> Result<TransportConfig> {
        let remote = self
            .remote
            .as_deref()
            .context("no remote registry configured (set `remote` in config.toml)")?;
        let mut config = TransportConfig::new(remote);
        config.timeout_secs = self.timeout_secs;
        config.danger_accept_invalid_certs = self.insecure || insecure_flag;
        Ok(config)
    }
}
