//! # Storage Errors

use thiserror::Error;

/// Result type for data file operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Data file errors
///
/// Plain reads degrade to the empty default instead; these surface from
/// writes and from read-modify-write updates.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Failed to encode {path}: {message}")]
    EncodeError { path: String, message: String },

    /// The existing file cannot be read as a document; it is left untouched
    #[error("Refusing to overwrite malformed {path}: {message}")]
    MalformedError { path: String, message: String },
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        StorageError::IoError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn malformed(path: &std::path::Path, message: impl ToString) -> Self {
        StorageError::MalformedError {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn encode(path: &std::path::Path, err: serde_json::Error) -> Self {
        StorageError::EncodeError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
