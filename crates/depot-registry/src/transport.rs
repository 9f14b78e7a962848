//! Remote transport: moving artifact payload and seal to and from a
//! remote registry endpoint.
//!
//! The `RemoteTransport` trait is the seam the store talks through;
//! `HttpTransport` is the blocking HTTP implementation. Certificate
//! validation is on by default and only disabled through the clearly
//! named `danger_accept_invalid_certs` flag.

use std::path::Path;
use std::time::Duration;

use depot_core::{PackageName, BLOB_EXT, SEAL_EXT};

use crate::error::{RegistryError, Result};

/// Basic-auth credentials for the remote registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Parse `user:password`. A missing `:` yields an empty password.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((user, password)) => Credentials {
                user: user.to_string(),
                password: password.to_string(),
            },
            None => Credentials {
                user: raw.to_string(),
                password: String::new(),
            },
        }
    }
}

/// Blob and seal bytes fetched from a remote registry.
#[derive(Debug, Clone)]
pub struct RemotePackage {
    pub blob: Vec<u8>,
    pub seal: Vec<u8>,
}

/// Moves artifact payload + seal to/from a remote endpoint.
pub trait RemoteTransport {
    /// Upload the backing blob/seal pair stored under `file_ref` in
    /// `registry_dir` to the remote repository named by `name`.
    fn upload(
        &self,
        name: &PackageName,
        registry_dir: &Path,
        file_ref: &str,
        credentials: Option<&Credentials>,
    ) -> Result<()>;

    /// Download the blob/seal pair the remote holds for `name`.
    fn download(
        &self,
        name: &PackageName,
        credentials: Option<&Credentials>,
    ) -> Result<RemotePackage>;
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the remote registry, e.g. `https://depot.example.com`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Disable TLS certificate validation. Off by default; only for
    /// registries with self-signed certificates, and only when asked
    /// for explicitly.
    pub danger_accept_invalid_certs: bool,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        TransportConfig {
            base_url: base_url.into(),
            timeout_secs: 30,
            danger_accept_invalid_certs: false,
        }
    }
}

/// Blocking HTTP transport against a remote registry.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()
            .map_err(|e| RegistryError::Transport {
                detail: format!("building HTTP client: {e}"),
            })?;
        Ok(HttpTransport {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        credentials: Option<&Credentials>,
    ) -> Result<()> {
        let mut req = self.client.put(url).body(body);
        if let Some(c) = credentials {
            req = req.basic_auth(&c.user, Some(&c.password));
        }
        let resp = req.send().map_err(|e| RegistryError::Transport {
            detail: format!("PUT {url}: {e}"),
        })?;
        if !resp.status().is_success() {
            return Err(RegistryError::Transport {
                detail: format!("PUT {url}: status {}", resp.status()),
            });
        }
        Ok(())
    }

    fn get(&self, url: &str, credentials: Option<&Credentials>) -> Result<Vec<u8>> {
        let mut req = self.client.get(url);
        if let Some(c) = credentials {
            req = req.basic_auth(&c.user, Some(&c.password));
        }
        let resp = req.send().map_err(|e| RegistryError::Transport {
            detail: format!("GET {url}: {e}"),
        })?;
        if !resp.status().is_success() {
            return Err(RegistryError::Transport {
                detail: format!("GET {url}: status {}", resp.status()),
            });
        }
        let bytes = resp.bytes().map_err(|e| RegistryError::Transport {
            detail: format!("GET {url}: reading body: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}

impl RemoteTransport for HttpTransport {
    fn upload(
        &self,
        name: &PackageName,
        registry_dir: &Path,
        file_ref: &str,
        credentials: Option<&Credentials>,
    ) -> Result<()> {
        let repo = name.repository();
        let blob_path = registry_dir.join(format!("{file_ref}.{BLOB_EXT}"));
        let seal_path = registry_dir.join(format!("{file_ref}.{SEAL_EXT}"));
        let blob = std::fs::read(&blob_path)?;
        let seal = std::fs::read(&seal_path)?;

        self.put(
            &format!("{}/{repo}/{file_ref}.{BLOB_EXT}", self.base_url),
            blob,
            credentials,
        )?;
        self.put(
            &format!("{}/{repo}/{file_ref}.{SEAL_EXT}", self.base_url),
            seal,
            credentials,
        )
    }

    fn download(
        &self,
        name: &PackageName,
        credentials: Option<&Credentials>,
    ) -> Result<RemotePackage> {
        let repo = name.repository();
        let tag = &name.tag;
        let blob = self.get(
            &format!("{}/{repo}/{tag}.{BLOB_EXT}", self.base_url),
            credentials,
        )?;
        let seal = self.get(
            &format!("{}/{repo}/{tag}.{SEAL_EXT}", self.base_url),
            credentials,
        )?;
        Ok(RemotePackage { blob, seal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_split_on_first_colon() {
        let c = Credentials::parse("alice:s3cr:et");
        assert_eq!(c.user, "alice");
        assert_eq!(c.password, "s3cr:et");
    }

    #[test]
    fn credentials_without_password() {
        let c = Credentials::parse("alice");
        assert_eq!(c.user, "alice");
        assert_eq!(c.password, "");
    }

    #[test]
    fn config_defaults_to_validated_tls() {
        let config = TransportConfig::new("https://depot.example.com");
        assert!(!config.danger_accept_invalid_certs);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport =
            HttpTransport::new(&TransportConfig::new("https://depot.example.com/")).unwrap();
        assert_eq!(transport.base_url, "https://depot.example.com");
    }
}
