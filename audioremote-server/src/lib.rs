//! # AudioRemote Server Library
//!
//! HTTP control surface for a desktop machine: media keys and system volume,
//! gated by a single bearer token.
//!
//! **Architecture:** axum router with a public and a protected half. The
//! protected half sits behind [`api::auth::require_token`]; handlers hand off
//! to the [`control`] capabilities on the blocking thread pool.

use std::sync::Arc;

use audioremote_common::api::InfoResponse;
use audioremote_common::TokenStore;
use axum::Router;

pub mod api;
pub mod cli;
pub mod control;
pub mod error;
pub mod server;

pub use error::{Error, Result};

use control::{AudioEndpoint, KeyInjector, MediaController, VolumeController};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active bearer token
    pub tokens: TokenStore,
    /// Media key injection (press + release)
    pub media: Arc<MediaController>,
    /// Serialized, session-bracketed volume changes
    pub volume: Arc<VolumeController>,
    /// Static body of `GET /info`, fixed at startup
    pub info: Arc<InfoResponse>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        tokens: TokenStore,
        keys: Arc<dyn KeyInjector>,
        endpoint: Arc<dyn AudioEndpoint>,
        info: InfoResponse,
    ) -> Self {
        Self {
            tokens,
            media: Arc::new(MediaController::new(keys)),
            volume: Arc::new(VolumeController::new(endpoint)),
            info: Arc::new(info),
        }
    }
}

/// Build application router
///
/// Public: `GET /ping`, `GET /info`.
/// Protected (bearer token): `POST /command/:action`, `POST /volume`.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/command/:action", post(api::command::send_command))
        .route("/volume", post(api::volume::set_volume))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_token,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/ping", get(api::info::ping))
        .route("/info", get(api::info::server_info));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
}
