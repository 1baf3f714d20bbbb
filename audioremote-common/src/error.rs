//! Common error types for AudioRemote

use thiserror::Error;

/// Common result type for AudioRemote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the library and the server
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token file could not be read or written
    #[error("Token file {path}: {source}")]
    TokenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
