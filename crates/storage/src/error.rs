//! Error types for storage operations.

use objsync_filesystem::FileSystemError;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Invalid or missing configuration. Fatal before any transfer begins.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Credential resolution or token exchange failure.
    #[error("Credential error: {message}")]
    Credentials { message: String },

    /// Network error from the storage service.
    #[error("Network error: {message}")]
    NetworkError { message: String, retryable: bool },

    /// Local I/O error.
    #[error("I/O error for {path}: {message}")]
    IoError { path: String, message: String },

    /// Pattern selection failure.
    #[error(transparent)]
    Selection(#[from] FileSystemError),

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl StorageError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            StorageError::NetworkError { retryable, .. } => *retryable,
            StorageError::InvalidConfig { .. } => false,
            StorageError::Credentials { .. } => false,
            StorageError::IoError { .. } => false,
            StorageError::Selection(_) => false,
            StorageError::Other { .. } => false,
        }
    }
}

/// Non-fatal error encountered while transferring a single file.
#[derive(Debug)]
pub struct TransferError {
    /// The destination key that failed.
    pub key: String,
    /// The error that occurred.
    pub error: StorageError,
}

impl TransferError {
    /// Create a new transfer error.
    pub fn new(key: impl Into<String>, error: StorageError) -> Self {
        Self {
            key: key.into(),
            error,
        }
    }
}
