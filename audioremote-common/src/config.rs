//! Configuration loading and resolution
//!
//! Bootstrap configuration comes from an optional TOML file. Resolution
//! priority, highest first:
//! 1. Command-line argument / environment variable (applied by the binary)
//! 2. Explicit `--config` path
//! 3. `audioremote.toml` in the working directory
//! 4. `<config dir>/audioremote/config.toml`
//! 5. Compiled defaults
//!
//! A missing config file is not an error. A malformed one is.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::token::DEFAULT_TOKEN_FILE;
use crate::{Error, Result};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "audioremote.toml";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Bind address
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Path of the plain text token file
    pub token_file: PathBuf,

    /// Allow cross-origin requests from any origin
    pub cors: bool,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Control capability backend
    pub backend: BackendConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            cors: true,
            logging: LoggingConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error); `RUST_LOG` wins
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Which implementation performs key injection and volume changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Run external programs (xdotool, pactl, ...)
    #[default]
    Command,
    /// Only log what would be done
    Log,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Command => f.write_str("command"),
            BackendKind::Log => f.write_str("log"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "command" => Ok(BackendKind::Command),
            "log" => Ok(BackendKind::Log),
            other => Err(Error::Config(format!(
                "unknown backend '{}' (expected 'command' or 'log')",
                other
            ))),
        }
    }
}

/// Backend selection and command templates
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub keys: KeyCommands,
    pub volume: VolumeCommands,
}

/// Command templates for media key injection
///
/// `{key}` in `press`/`release` is replaced by the key name configured for
/// the action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyCommands {
    pub press: Vec<String>,
    pub release: Vec<String>,
    pub playpause: String,
    pub next: String,
    pub prev: String,
}

impl Default for KeyCommands {
    fn default() -> Self {
        let (press, release) = if cfg!(target_os = "linux") {
            (
                vec!["xdotool", "keydown", "{key}"],
                vec!["xdotool", "keyup", "{key}"],
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            press: to_strings(&press),
            release: to_strings(&release),
            playpause: "XF86AudioPlay".to_string(),
            next: "XF86AudioNext".to_string(),
            prev: "XF86AudioPrev".to_string(),
        }
    }
}

/// Command templates for system volume
///
/// `{percent}` is replaced by the level rounded to an integer, `{fraction}`
/// by the normalized value in [0, 1]. `initialize`/`teardown` run before
/// and after every `set`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VolumeCommands {
    pub set: Vec<String>,
    pub initialize: Vec<String>,
    pub teardown: Vec<String>,
}

impl Default for VolumeCommands {
    fn default() -> Self {
        let set = if cfg!(target_os = "linux") {
            vec!["pactl", "set-sink-volume", "@DEFAULT_SINK@", "{percent}%"]
        } else if cfg!(target_os = "macos") {
            vec!["osascript", "-e", "set volume output volume {percent}"]
        } else {
            Vec::new()
        };

        Self {
            set: to_strings(&set),
            initialize: Vec::new(),
            teardown: Vec::new(),
        }
    }
}

fn to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `explicit` or the standard locations
    ///
    /// An explicit path that does not exist is an error; missing files in
    /// the standard locations fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => default_config_paths().into_iter().find(|p| p.exists()),
        };

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)?;
                let config: Self = toml::from_str(&content)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
                Ok((config, ConfigSource::File(path)))
            }
            None => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }
}

/// Candidate config file locations, in lookup order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("audioremote").join("config.toml"));
    }
    paths
}
