//! System volume changes
//!
//! Every change runs inside an [`AudioSession`]: the platform audio
//! subsystem is initialized when the session opens and torn down when it
//! drops, whether the change succeeded, failed, or panicked.
//!
//! Changes are serialized behind one mutex. Concurrent sessions on a shared
//! audio context can race between one caller's teardown and another's call.

use std::sync::{Arc, Mutex, PoisonError};

use audioremote_common::api::VolumeLevel;
use tracing::debug;

use super::{AudioEndpoint, CapabilityError};

/// Scoped initialization of an [`AudioEndpoint`]
///
/// Only exists if `initialize` succeeded, so `uninitialize` runs exactly
/// once per successful `initialize`.
pub struct AudioSession<'a> {
    endpoint: &'a dyn AudioEndpoint,
}

impl<'a> AudioSession<'a> {
    pub fn open(endpoint: &'a dyn AudioEndpoint) -> Result<Self, CapabilityError> {
        endpoint.initialize()?;
        Ok(Self { endpoint })
    }

    pub fn set_master_volume_scalar(&self, fraction: f32) -> Result<(), CapabilityError> {
        self.endpoint.set_master_volume_scalar(fraction)
    }
}

impl Drop for AudioSession<'_> {
    fn drop(&mut self) {
        self.endpoint.uninitialize();
    }
}

/// Applies volume levels through an [`AudioEndpoint`], one at a time
pub struct VolumeController {
    endpoint: Arc<dyn AudioEndpoint>,
    serial: Mutex<()>,
}

impl VolumeController {
    pub fn new(endpoint: Arc<dyn AudioEndpoint>) -> Self {
        Self {
            endpoint,
            serial: Mutex::new(()),
        }
    }

    /// Set system output volume to `level` percent
    pub fn set_level(&self, level: VolumeLevel) -> Result<(), CapabilityError> {
        // A panic inside a previous session leaves nothing to repair
        let _serial = self.serial.lock().unwrap_or_else(PoisonError::into_inner);

        let session = AudioSession::open(self.endpoint.as_ref())?;
        debug!(fraction = level.fraction(), "Setting master volume");
        session.set_master_volume_scalar(level.fraction())
    }
}
