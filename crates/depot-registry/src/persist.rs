//! Index persistence.
//!
//! The registry document is rewritten in full on every mutation. The
//! `IndexStore` trait isolates that behind a seam so the store logic
//! does not care whether the document lands on disk or in memory.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};
use crate::index::Registry;

/// Where the registry index document lives.
pub trait IndexStore {
    /// Load the document. `None` when no document exists yet.
    fn load(&self) -> Result<Option<Registry>>;

    /// Replace the document wholesale.
    fn save(&self, registry: &Registry) -> Result<()>;
}

/// JSON index document on disk.
///
/// Saves go through a temp file in the same directory followed by a
/// rename, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// An index store at the given document path.
    pub fn new(path: PathBuf) -> Self {
        JsonFileStore { path }
    }

    /// Path of the index document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStore for JsonFileStore {
    fn load(&self) -> Result<Option<Registry>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path).map_err(|e| RegistryError::Index {
            path: self.path.clone(),
            detail: format!("reading index: {e}"),
        })?;
        let registry = serde_json::from_slice(&bytes).map_err(|e| RegistryError::Index {
            path: self.path.clone(),
            detail: format!("parsing index: {e}"),
        })?;
        Ok(Some(registry))
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let bytes = serde_json::to_vec_pretty(registry)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes).map_err(|e| RegistryError::Index {
            path: tmp.clone(),
            detail: format!("writing index: {e}"),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| RegistryError::Index {
            path: self.path.clone(),
            detail: format!("replacing index: {e}"),
        })?;
        Ok(())
    }
}

/// In-memory index store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<Registry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl IndexStore for MemoryStore {
    fn load(&self) -> Result<Option<Registry>> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        *self.document.borrow_mut() = Some(registry.clone());
        Ok(())
    }
}
