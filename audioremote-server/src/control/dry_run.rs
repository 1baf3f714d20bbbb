//! Backend that performs nothing and logs every call
//!
//! Useful on headless hosts and for exercising clients without touching
//! the machine's audio.

use tracing::info;

use super::{AudioEndpoint, CapabilityError, KeyInjector, MediaKey};

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunBackend;

impl KeyInjector for DryRunBackend {
    fn press(&self, key: MediaKey) -> Result<(), CapabilityError> {
        info!(%key, "[dry-run] key down");
        Ok(())
    }

    fn release(&self, key: MediaKey) -> Result<(), CapabilityError> {
        info!(%key, "[dry-run] key up");
        Ok(())
    }
}

impl AudioEndpoint for DryRunBackend {
    fn set_master_volume_scalar(&self, fraction: f32) -> Result<(), CapabilityError> {
        info!(fraction, "[dry-run] master volume");
        Ok(())
    }
}
