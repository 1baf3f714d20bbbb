//! Control capabilities
//!
//! The operating system primitives the server drives: media key injection
//! and system output volume. The HTTP layer only sees the two traits below;
//! which implementation sits behind them is chosen from configuration.
//!
//! - [`command::CommandBackend`]: runs external programs (xdotool, pactl, ...)
//! - [`dry_run::DryRunBackend`]: logs what would have happened

use std::fmt;
use std::sync::Arc;

use audioremote_common::api::MediaAction;
use audioremote_common::config::{BackendConfig, BackendKind};
use thiserror::Error;

pub mod command;
pub mod dry_run;
pub mod media;
pub mod volume;

pub use media::MediaController;
pub use volume::{AudioSession, VolumeController};

/// Hardware media keys the server can simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKey {
    PlayPause,
    NextTrack,
    PreviousTrack,
}

impl From<MediaAction> for MediaKey {
    fn from(action: MediaAction) -> Self {
        match action {
            MediaAction::PlayPause => MediaKey::PlayPause,
            MediaAction::Next => MediaKey::NextTrack,
            MediaAction::Prev => MediaKey::PreviousTrack,
        }
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKey::PlayPause => "media_play_pause",
            MediaKey::NextTrack => "media_next",
            MediaKey::PreviousTrack => "media_previous",
        };
        f.write_str(name)
    }
}

/// Failure of an operating system capability
///
/// The `Display` text is returned to the client verbatim.
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// Backend reported a failure
    #[error("{0}")]
    Failed(String),

    /// Nothing configured to perform this operation
    #[error("No command configured for {0}")]
    NotConfigured(&'static str),

    /// External program could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External program exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Simulates hardware media key events at the OS input layer
pub trait KeyInjector: Send + Sync {
    fn press(&self, key: MediaKey) -> Result<(), CapabilityError>;
    fn release(&self, key: MediaKey) -> Result<(), CapabilityError>;
}

/// System audio output endpoint
///
/// `initialize` and `uninitialize` bracket every volume change; see
/// [`AudioSession`].
pub trait AudioEndpoint: Send + Sync {
    /// Prepare the platform audio subsystem for this thread
    fn initialize(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    /// Set master output volume as a fraction in [0, 1]
    fn set_master_volume_scalar(&self, fraction: f32) -> Result<(), CapabilityError>;

    /// Release what `initialize` acquired
    fn uninitialize(&self) {}
}

/// Instantiate the configured backend for both capabilities
pub fn from_config(config: &BackendConfig) -> (Arc<dyn KeyInjector>, Arc<dyn AudioEndpoint>) {
    match config.kind {
        BackendKind::Command => {
            let backend = Arc::new(command::CommandBackend::new(
                config.keys.clone(),
                config.volume.clone(),
            ));
            let keys: Arc<dyn KeyInjector> = backend.clone();
            let endpoint: Arc<dyn AudioEndpoint> = backend;
            (keys, endpoint)
        }
        BackendKind::Log => {
            let backend = Arc::new(dry_run::DryRunBackend);
            let keys: Arc<dyn KeyInjector> = backend.clone();
            let endpoint: Arc<dyn AudioEndpoint> = backend;
            (keys, endpoint)
        }
    }
}
