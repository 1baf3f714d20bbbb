//! External-program backend
//!
//! Each capability is an argument template from the `[backend]` config
//! section. Placeholders:
//! - `{key}`: key name configured for the media action
//! - `{percent}`: volume rounded to an integer percentage
//! - `{fraction}`: volume in [0, 1]
//!
//! A non-zero exit status is a failure carrying the program's stderr.

use std::process::Command;

use audioremote_common::config::{KeyCommands, VolumeCommands};
use tracing::{debug, warn};

use super::{AudioEndpoint, CapabilityError, KeyInjector, MediaKey};

/// Runs configured external programs for key injection and volume
pub struct CommandBackend {
    keys: KeyCommands,
    volume: VolumeCommands,
}

impl CommandBackend {
    pub fn new(keys: KeyCommands, volume: VolumeCommands) -> Self {
        Self { keys, volume }
    }

    fn key_name(&self, key: MediaKey) -> &str {
        match key {
            MediaKey::PlayPause => &self.keys.playpause,
            MediaKey::NextTrack => &self.keys.next,
            MediaKey::PreviousTrack => &self.keys.prev,
        }
    }
}

impl KeyInjector for CommandBackend {
    fn press(&self, key: MediaKey) -> Result<(), CapabilityError> {
        run_template(&self.keys.press, &[("{key}", self.key_name(key))], "key press")
    }

    fn release(&self, key: MediaKey) -> Result<(), CapabilityError> {
        run_template(&self.keys.release, &[("{key}", self.key_name(key))], "key release")
    }
}

impl AudioEndpoint for CommandBackend {
    fn initialize(&self) -> Result<(), CapabilityError> {
        if self.volume.initialize.is_empty() {
            return Ok(());
        }
        run_template(&self.volume.initialize, &[], "audio initialize")
    }

    fn set_master_volume_scalar(&self, fraction: f32) -> Result<(), CapabilityError> {
        let percent = format!("{}", (fraction * 100.0).round() as u32);
        let fraction = format!("{:.2}", fraction);
        run_template(
            &self.volume.set,
            &[("{percent}", &percent), ("{fraction}", &fraction)],
            "volume set",
        )
    }

    fn uninitialize(&self) {
        if self.volume.teardown.is_empty() {
            return;
        }
        if let Err(e) = run_template(&self.volume.teardown, &[], "audio teardown") {
            warn!(error = %e, "Audio teardown failed");
        }
    }
}

/// Expand placeholders in `template`
fn expand(template: &[String], substitutions: &[(&str, &str)]) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            substitutions
                .iter()
                .fold(arg.clone(), |acc, (from, to)| acc.replace(from, to))
        })
        .collect()
}

fn run_template(
    template: &[String],
    substitutions: &[(&str, &str)],
    operation: &'static str,
) -> Result<(), CapabilityError> {
    let args = expand(template, substitutions);
    let (program, rest) = args
        .split_first()
        .ok_or(CapabilityError::NotConfigured(operation))?;

    debug!(%program, args = ?rest, operation, "Running backend command");

    let output = Command::new(program)
        .args(rest)
        .output()
        .map_err(|source| CapabilityError::Spawn {
            program: program.clone(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(CapabilityError::Exit {
            program: program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
