//! POST /command/:action

use std::net::SocketAddr;

use audioremote_common::api::MediaAction;
use axum::extract::{ConnectInfo, Path, State};
use tracing::{info, warn};

use super::auth::display_peer;
use super::{run_blocking, ApiError};
use crate::control::MediaKey;
use crate::AppState;

/// Press and release the media key for `action`
///
/// Returns `"<action> sent"`. Unknown actions are refused before anything
/// is injected.
pub async fn send_command(
    State(state): State<AppState>,
    Path(action): Path<String>,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<String, ApiError> {
    let peer = display_peer(peer.as_ref());

    let media_action = match action.parse::<MediaAction>() {
        Ok(media_action) => media_action,
        Err(_) => {
            warn!(%peer, %action, "Rejected unknown media action");
            return Err(ApiError::InvalidAction(action));
        }
    };

    let key = MediaKey::from(media_action);
    let media = state.media.clone();
    if let Err(e) = run_blocking(move || media.tap(key)).await {
        warn!(%peer, action = %media_action, error = %e.message(), "Media key injection failed");
        return Err(e);
    }

    info!(%peer, action = %media_action, "Media command sent");
    Ok(format!("{} sent", media_action))
}
