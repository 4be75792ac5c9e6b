//! Error types for file selection.

use objsync_common::PathError;
use thiserror::Error;

/// Errors that can occur during pattern selection.
#[derive(Debug, Error)]
pub enum FileSystemError {
    /// A glob pattern failed to compile.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern {
        /// The offending pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// Local I/O error.
    #[error("I/O error for {path}: {source}")]
    IoError {
        /// Path where the error occurred.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Path normalization error.
    #[error(transparent)]
    Path(#[from] PathError),
}
