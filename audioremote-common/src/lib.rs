//! # AudioRemote Common Library
//!
//! Shared code for the AudioRemote control server:
//! - Authentication token persistence and comparison
//! - Bearer credential parsing
//! - API request/response types
//! - Configuration loading
//! - Local network address discovery

pub mod api;
pub mod config;
pub mod error;
pub mod net;
pub mod token;

pub use error::{Error, Result};
pub use token::TokenStore;
