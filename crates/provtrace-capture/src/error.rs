//! Error types for provenance capture

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CaptureError
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur during provenance capture
#[derive(Error, Debug)]
pub enum CaptureError {
    /// A path that exists on disk could not be opened or read for hashing
    #[error("Cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output document could not be written
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Requested output format is not supported
    #[error("Unsupported provenance format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::Serialization(err.to_string())
    }
}
