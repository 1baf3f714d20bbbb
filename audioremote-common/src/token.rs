//! Authentication token persistence
//!
//! The server holds exactly one active bearer token. It lives in a plain text
//! file so it survives restarts, and in memory behind a lock so that a
//! replacement becomes visible to every request dispatched after it.
//!
//! # Lifecycle
//!
//! 1. [`TokenStore::load_or_create`] at startup: read the file, or generate
//!    and persist a fresh token when the file is absent.
//! 2. [`TokenStore::replace`] / [`TokenStore::regenerate`] at runtime: write
//!    the file first, then swap the in-memory value.
//! 3. [`TokenStore::reload`] when another process rewrote the file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{info, warn};

use crate::{Error, Result};

/// Default token file, relative to the working directory
pub const DEFAULT_TOKEN_FILE: &str = "server_token.txt";

/// Random bytes behind each generated token
pub const TOKEN_ENTROPY_BYTES: usize = 32;

/// Process-wide holder of the active bearer token
///
/// Cloning is cheap and every clone shares the same cell. The cell is an
/// `RwLock<Arc<str>>`: each read takes the read guard only long enough to
/// clone the `Arc`, and comparison happens after the guard is released.
/// Replacement takes the write guard and swaps the `Arc`.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    current: Arc<RwLock<Arc<str>>>,
}

impl TokenStore {
    /// Load the token from `path`, creating and persisting a new one if the
    /// file does not exist.
    ///
    /// A file that is empty after trimming counts as absent.
    pub fn load_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let token = match read_token_file(&path)? {
            Some(token) => {
                info!(path = %path.display(), "Loaded authentication token");
                token
            }
            None => {
                let token = generate_token();
                write_token_file(&path, &token)?;
                info!(path = %path.display(), "Generated new authentication token");
                token
            }
        };

        Ok(Self {
            path,
            current: Arc::new(RwLock::new(Arc::from(token))),
        })
    }

    /// Path of the backing token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the active token
    ///
    /// Holds the read lock for one `Arc` clone.
    pub fn current(&self) -> Arc<str> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Compare `candidate` against the active token in constant time
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = self.current();
        constant_time_eq(candidate.as_bytes(), expected.as_bytes())
    }

    /// Replace the active token with a caller-supplied value
    ///
    /// The value is trimmed and must not be empty. The file is written before
    /// the in-memory value changes, so a failed write leaves the old token
    /// active.
    pub fn replace(&self, new_value: &str) -> Result<()> {
        let token = new_value.trim();
        if token.is_empty() {
            return Err(Error::InvalidInput("token must not be empty".to_string()));
        }

        write_token_file(&self.path, token)?;
        self.swap(Arc::from(token));
        info!(path = %self.path.display(), "Authentication token replaced");
        Ok(())
    }

    /// Replace the active token with a freshly generated one and return it
    pub fn regenerate(&self) -> Result<Arc<str>> {
        let token = generate_token();
        self.replace(&token)?;
        Ok(self.current())
    }

    /// Re-read the token file and activate its contents
    ///
    /// Returns `true` if the active value changed. An empty or missing file
    /// keeps the current token.
    pub fn reload(&self) -> Result<bool> {
        match read_token_file(&self.path)? {
            Some(token) => {
                if self.verify(&token) {
                    return Ok(false);
                }
                self.swap(Arc::from(token));
                info!(path = %self.path.display(), "Authentication token reloaded from file");
                Ok(true)
            }
            None => {
                warn!(
                    path = %self.path.display(),
                    "Token file missing or empty, keeping current token"
                );
                Ok(false)
            }
        }
    }

    fn swap(&self, token: Arc<str>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = token;
    }
}

/// Generate a URL-safe token from [`TOKEN_ENTROPY_BYTES`] bytes of OS randomness
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn read_token_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let token = content.trim();
            if token.is_empty() {
                warn!(path = %path.display(), "Token file is empty");
                Ok(None)
            } else {
                Ok(Some(token.to_string()))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::TokenFile {
            path: path.display().to_string(),
            source,
        }),
    }
}

fn write_token_file(path: &Path, token: &str) -> Result<()> {
    let to_error = |source| Error::TokenFile {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, token).map_err(to_error)
}
