//! Error types for tagrove.

use thiserror::Error;

/// Result type alias using tagrove's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tagrove operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found in the vault
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Settings load or persist failed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Malformed vault path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Interactive tag editor failed or returned malformed input
    #[error("Editor error: {0}")]
    Editor(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
