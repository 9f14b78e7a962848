//! Registry filesystem layout.
//!
//! The local registry is a single directory holding the index document
//! plus one blob/seal file pair per artifact, both named by a generated
//! base name:
//!
//! ```text
//! <root>/
//!   repository.json      — registry index, rewritten on every mutation
//!   <file-ref>.zip       — packaged artifact blob
//!   <file-ref>.json      — seal document
//! ```

use std::path::PathBuf;

/// Extension of packaged artifact blobs.
pub const BLOB_EXT: &str = "zip";

/// Extension of seal documents.
pub const SEAL_EXT: &str = "json";

/// File name of the registry index document.
pub const INDEX_FILE: &str = "repository.json";

/// Environment variable overriding the registry root.
pub const ROOT_ENV: &str = "DEPOT_HOME";

/// The root directory of the local registry.
///
/// `$DEPOT_HOME` if set, else `$HOME/.depot`. `None` when neither
/// variable is available.
pub fn registry_root() -> Option<PathBuf> {
    if let Some(root) = std::env::var_os(ROOT_ENV) {
        return Some(PathBuf::from(root));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".depot"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_depot_suffix_under_home() {
        // Depends on HOME, present in any test environment we run in.
        if std::env::var_os(ROOT_ENV).is_none() {
            let root = registry_root().unwrap();
            assert!(root.ends_with(".depot"));
        }
    }
}
