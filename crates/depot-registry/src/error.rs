//! Registry error types.

use std::path::PathBuf;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Reference resolved to nothing.
    #[error("artifact not found: {reference}")]
    NotFound { reference: String },

    /// A content-id fragment matched more than one artifact.
    #[error("reference '{fragment}' is not long enough to pin down one artifact, {count} were found")]
    Ambiguous { fragment: String, count: usize },

    /// Source file rejected on add.
    #[error("invalid package file {path}: {detail}")]
    InvalidPackage { path: PathBuf, detail: String },

    /// Seal document could not be read or parsed.
    #[error("invalid seal: {detail}")]
    InvalidSeal { detail: String },

    /// Index persistence failure.
    #[error("registry index error at {path}: {detail}")]
    Index { path: PathBuf, detail: String },

    /// Remote transport failure.
    #[error("transport error: {detail}")]
    Transport { detail: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
