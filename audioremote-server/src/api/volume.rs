//! POST /volume

use std::net::SocketAddr;

use audioremote_common::api::VolumeLevel;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
};
use tracing::{info, warn};

use super::auth::display_peer;
use super::{run_blocking, ApiError};
use crate::AppState;

/// Set system output volume from `{"level": <0..=100>}`
///
/// The body is read raw so a missing or non-JSON body maps to
/// `missing_field` instead of axum's own JSON rejection.
pub async fn set_volume(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Bytes,
) -> Result<String, ApiError> {
    let peer = display_peer(peer.as_ref());

    let level = VolumeLevel::from_body(&body).map_err(|rejection| {
        warn!(%peer, ?rejection, "Rejected volume request");
        ApiError::from(rejection)
    })?;

    let volume = state.volume.clone();
    if let Err(e) = run_blocking(move || volume.set_level(level)).await {
        warn!(%peer, %level, error = %e.message(), "Volume change failed");
        return Err(e);
    }

    info!(%peer, %level, "Volume set");
    Ok(format!("Volume set to {}%", level))
}
