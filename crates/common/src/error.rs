//! Common error types for user data handling.

use thiserror::Error;

/// Common error type for password and redaction operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Redaction error: {0}")]
    Redaction(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;
