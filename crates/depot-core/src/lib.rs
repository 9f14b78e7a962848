//! Core vocabulary for the Depot artifact registry.
//!
//! Defines the pieces every other crate speaks in terms of:
//! - **Package names** — `domain/group/name:tag` references and their
//!   canonical fully-qualified repository form
//! - **Seals** — the interchange document describing a packaged
//!   artifact (type, size, creation time, checksum)
//! - **Content identifiers** — SHA-256 digests of seals, used for
//!   deduplication and substring addressing
//! - **Registry paths** — where the local registry lives on disk

pub mod digest;
pub mod name;
pub mod paths;
pub mod seal;

// Re-exports for convenience.
pub use name::{NameError, PackageName};
pub use paths::{registry_root, BLOB_EXT, INDEX_FILE, SEAL_EXT};
pub use seal::{artifact_id, Seal, SealManifest};
