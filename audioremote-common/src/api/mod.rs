//! API module for shared HTTP API functionality
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Shared types
//!
//! The server wraps these with framework-specific middleware (Axum).

pub mod auth;
pub mod types;

pub use auth::{authenticate, parse_bearer, AuthRejection};
pub use types::{ErrorResponse, InfoResponse, LevelRejection, MediaAction, VolumeLevel};
