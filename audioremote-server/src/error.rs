//! Error types for audioremote-server
//!
//! Startup and lifecycle failures. Request-level failures are
//! [`crate::api::ApiError`]; capability failures are
//! [`crate::control::CapabilityError`].

use thiserror::Error;

/// Main error type for the server crate
#[derive(Error, Debug)]
pub enum Error {
    /// Listener could not be bound
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Socket and file I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using the server Error
pub type Result<T> = std::result::Result<T, Error>;
