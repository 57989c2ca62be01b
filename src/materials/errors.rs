//! # Material Analysis Errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for material operations
pub type MaterialResult<T> = Result<T, MaterialError>;

/// Material analysis errors
///
/// Model failures never reach HTTP callers: the analyzer falls back to the
/// heuristic record. Only cache writes propagate.
#[derive(Debug, Clone, Error)]
pub enum MaterialError {
    /// Request could not be sent or the response body not read
    #[error("Model request failed: {0}")]
    Request(String),

    /// Non-2xx response from the model endpoint
    #[error("Model endpoint returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Response carried no output text
    #[error("Model response has no output text")]
    EmptyOutput,

    /// Output text is not a JSON object
    #[error("Model output is not a JSON object: {0}")]
    InvalidJson(String),

    /// Cache write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for MaterialError {
    fn from(e: reqwest::Error) -> Self {
        MaterialError::Request(e.to_string())
    }
}
