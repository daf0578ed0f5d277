//! Error types for tally-io

use thiserror::Error;

/// Errors that can occur while reading or writing sample files
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Failed to create file {path}: {reason}")]
    CreateFailed { path: String, reason: String },

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
