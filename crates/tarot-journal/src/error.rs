//! Error types for reading history.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for history operations.
pub type JournalResult<T> = Result<T, JournalError>;

/// Errors that can occur while reading or writing history.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The history file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The history file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A reading could not be serialized.
    #[error("could not serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl JournalError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
