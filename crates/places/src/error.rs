//! Error types for the place store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while loading documents or querying a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Documents file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Documents are not valid JSON, or not place documents
    #[error("Invalid place documents: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store could not answer (connectivity, timeout, ...)
    #[error("Place store unavailable: {0}")]
    Unavailable(String),
}

/// Error code for integration with tourism-core error handling.
/// Range: 11xxx for store errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Documents file could not be read or written
    Io = 11001,
    /// Documents are not valid place documents
    InvalidDocuments = 11002,
    /// The backing store could not answer
    Unavailable = 11003,
}

impl StoreError {
    /// Returns the error code for this error.
    pub fn code(&self) -> StoreErrorCode {
        match self {
            StoreError::Io { .. } => StoreErrorCode::Io,
            StoreError::Json(_) => StoreErrorCode::InvalidDocuments,
            StoreError::Unavailable(_) => StoreErrorCode::Unavailable,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
