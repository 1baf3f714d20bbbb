//! Bearer token middleware
//!
//! Applied as a route layer on the protected routes only; `/ping` and
//! `/info` never pass through it.

use std::net::SocketAddr;

use audioremote_common::api::authenticate;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::ApiError;
use crate::AppState;

/// Reject the request with 401 unless it carries the active token
///
/// The handler is not reached on rejection, so no capability is invoked.
/// The presented credential is never logged.
pub async fn require_token(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.as_bytes());

    match authenticate(header, &state.tokens) {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            warn!(
                peer = %display_peer(peer.as_ref()),
                reason = rejection.code(),
                path = %request.uri().path(),
                "Rejected unauthenticated request"
            );
            ApiError::Unauthorized(rejection).into_response()
        }
    }
}

/// Client address for log lines; `unknown` when served without connect info
pub(crate) fn display_peer(peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    peer.map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
