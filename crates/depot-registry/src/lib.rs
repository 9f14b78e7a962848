//! Local artifact registry for Depot.
//!
//! Names, stores, tags, and synchronizes versioned build artifacts on
//! the local filesystem and exposes them to a remote counterpart for
//! push/pull distribution.
//!
//! # Architecture
//!
//! - The **index** mirrors the persisted registry document: ordered
//!   repositories, each an ordered list of content-addressed artifacts
//! - The **store** is the sole authority over artifact metadata; every
//!   mutation rewrites the whole index document through a swappable
//!   persistence seam
//! - The **transport** moves blob/seal pairs to and from a remote
//!   registry over authenticated HTTP
//!
//! Tags are mutable labels: within one repository a tag names at most
//! one artifact at any instant. Backing files are reference-counted
//! across repositories and deleted only when fully unreferenced.

pub mod error;
pub mod index;
pub mod list;
pub mod persist;
pub mod store;
pub mod transport;

// Re-exports for convenience.
pub use error::{RegistryError, Result};
pub use index::{Artifact, ArtifactLookup, Registry, RepoLookup, Repository};
pub use list::{elapsed_label, format_table, ListRow};
pub use persist::{IndexStore, JsonFileStore, MemoryStore};
pub use store::{LocalRegistry, RemoveOutcome};
pub use transport::{Credentials, HttpTransport, RemoteTransport, TransportConfig};
