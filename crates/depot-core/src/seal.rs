//! Seal documents and content identifiers.
//!
//! A seal is the interchange document produced by the packaging
//! pipeline alongside every artifact blob. It carries the artifact's
//! manifest: type, size, creation time, and the checksum of the
//! packaged content. The registry never inspects the blob itself;
//! everything it knows about an artifact comes from the seal.
//!
//! The artifact's content identifier is derived from the seal: the
//! SHA-256 digest of its canonical JSON bytes, rendered as
//! `sha256:<hex>`. Two identical builds produce the same seal and so
//! the same identifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::digest::sha256_hex;

/// Prefix of every content identifier.
pub const ID_PREFIX: &str = "sha256:";

/// The seal document accompanying a packaged artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    /// The artifact manifest.
    pub manifest: SealManifest,
}

/// Manifest section of a seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealManifest {
    /// Type of application in the artifact, e.g. `content/app`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable size label, carried verbatim.
    pub size: String,
    /// Creation time label, RFC 2822 text, carried verbatim and
    /// reparsed only for relative-age rendering.
    pub created: String,
    /// Checksum of the packaged blob.
    pub checksum: String,
    /// Free-form labels attached at packaging time.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Seal {
    /// Read and parse a seal document from disk.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Derive an artifact's content identifier from its seal.
///
/// The identifier is immutable after creation; the registry relies on
/// that for deduplication and substring addressing.
pub fn artifact_id(seal: &Seal) -> String {
    let json = serde_json::to_vec(seal).expect("seal serialization should not fail");
    format!("{}{}", ID_PREFIX, sha256_hex(&json))
}
