//! Bearer token authentication
//!
//! Every protected request carries `Authorization: Bearer <token>`. The
//! decision is made in three ordered steps:
//!
//! 1. Header absent → [`AuthRejection::Missing`]
//! 2. Header not `Bearer <value>` → [`AuthRejection::Malformed`]
//! 3. Value differs from the active token → [`AuthRejection::Invalid`]
//!
//! # Pure Functions
//!
//! No HTTP framework dependencies. The server middleware hands in the raw
//! header bytes and maps the rejection to a response.

use thiserror::Error;

use crate::token::TokenStore;

/// Scheme prefix expected in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

// ========================================
// Error Types
// ========================================

/// Reasons a request fails authentication
///
/// None of the variants carry the submitted or expected credential.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header
    #[error("Authentication token required")]
    Missing,

    /// Header present but not `Bearer <value>`
    #[error("Malformed authorization header")]
    Malformed,

    /// Well-formed credential that does not match the active token
    #[error("Invalid authentication token")]
    Invalid,
}

impl AuthRejection {
    /// Machine-readable kind for error payloads and logs
    pub fn code(&self) -> &'static str {
        match self {
            AuthRejection::Missing => "auth_missing",
            AuthRejection::Malformed => "auth_malformed",
            AuthRejection::Invalid => "auth_invalid",
        }
    }
}

// ========================================
// Header Parsing
// ========================================

/// Extract the credential from a raw `Authorization` header value
///
/// # Examples
///
/// ```
/// use audioremote_common::api::auth::{parse_bearer, AuthRejection};
///
/// assert_eq!(parse_bearer(Some("Bearer abc".as_bytes())), Ok("abc"));
/// assert_eq!(parse_bearer(None), Err(AuthRejection::Missing));
/// assert_eq!(parse_bearer(Some("Basic abc".as_bytes())), Err(AuthRejection::Malformed));
/// ```
pub fn parse_bearer(header: Option<&[u8]>) -> Result<&str, AuthRejection> {
    let raw = header.ok_or(AuthRejection::Missing)?;
    // Visible ASCII, space and tab only; same rule as `HeaderValue::to_str`
    if !raw.iter().all(|&b| b == b'\t' || (0x20..0x7f).contains(&b)) {
        return Err(AuthRejection::Malformed);
    }
    let value = std::str::from_utf8(raw).map_err(|_| AuthRejection::Malformed)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthRejection::Malformed)
}

/// Authenticate a request's `Authorization` header against the active token
pub fn authenticate(header: Option<&[u8]>, tokens: &TokenStore) -> Result<(), AuthRejection> {
    let credential = parse_bearer(header)?;

    if tokens.verify(credential) {
        Ok(())
    } else {
        Err(AuthRejection::Invalid)
    }
}

// ========================================
// Tests
// ========================================
