//! Unauthenticated discovery endpoints

use audioremote_common::api::InfoResponse;
use axum::{extract::State, Json};

use crate::AppState;

/// GET /ping
///
/// Liveness probe for clients scanning the LAN.
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /info
pub async fn server_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse::clone(&state.info))
}
