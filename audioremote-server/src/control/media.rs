//! Media key presses

use std::sync::Arc;

use tracing::debug;

use super::{CapabilityError, KeyInjector, MediaKey};

/// Sends complete key presses (down, then up) through a [`KeyInjector`]
pub struct MediaController {
    keys: Arc<dyn KeyInjector>,
}

impl MediaController {
    pub fn new(keys: Arc<dyn KeyInjector>) -> Self {
        Self { keys }
    }

    /// Press and release `key`
    ///
    /// A failed press is returned as-is and no release is attempted.
    pub fn tap(&self, key: MediaKey) -> Result<(), CapabilityError> {
        debug!(%key, "Injecting media key");
        self.keys.press(key)?;
        self.keys.release(key)
    }
}
