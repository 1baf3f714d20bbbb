//! Shared API request/response types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server name reported by `GET /info`
pub const SERVER_NAME: &str = "AudioRemote Server";

/// Protocol version reported by `GET /info`
///
/// Tracks the client-visible API, not the crate version.
pub const PROTOCOL_VERSION: &str = "2.0.0";

// ========================================
// Media Actions
// ========================================

/// Media control actions accepted by `POST /command/<action>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaAction {
    PlayPause,
    Next,
    Prev,
}

impl MediaAction {
    /// All accepted actions
    pub const ALL: [MediaAction; 3] = [MediaAction::PlayPause, MediaAction::Next, MediaAction::Prev];

    /// Path segment for this action
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaAction::PlayPause => "playpause",
            MediaAction::Next => "next",
            MediaAction::Prev => "prev",
        }
    }
}

impl fmt::Display for MediaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action name outside the accepted set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown media action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for MediaAction {
    type Err = UnknownAction;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

// ========================================
// Volume
// ========================================

/// Why a volume request body was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRejection {
    /// No body, no JSON object, or no `level` field
    MissingField,
    /// `level` present but not a number in [0, 100]
    InvalidRange,
}

/// Output volume percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VolumeLevel(f64);

impl VolumeLevel {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// `None` when `percent` is outside [0, 100] or not finite
    pub fn new(percent: f64) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&percent)
            .then_some(Self(percent))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Normalized fraction in [0, 1] for the system volume API
    pub fn fraction(&self) -> f32 {
        (self.0 / Self::MAX) as f32
    }

    /// Parse and validate a raw `POST /volume` body (`{"level": <number>}`)
    ///
    /// # Examples
    ///
    /// ```
    /// use audioremote_common::api::types::{LevelRejection, VolumeLevel};
    ///
    /// assert_eq!(VolumeLevel::from_body(br#"{"level": 50}"#).unwrap().percent(), 50.0);
    /// assert_eq!(VolumeLevel::from_body(b"{}"), Err(LevelRejection::MissingField));
    /// assert_eq!(VolumeLevel::from_body(br#"{"level": 101}"#), Err(LevelRejection::InvalidRange));
    /// ```
    pub fn from_body(body: &[u8]) -> Result<Self, LevelRejection> {
        let request: Value = serde_json::from_slice(body).map_err(|e| {
            // A literal beyond f64 (e.g. 1e400) fails the whole document
            if e.to_string().starts_with("number out of range") {
                LevelRejection::InvalidRange
            } else {
                LevelRejection::MissingField
            }
        })?;

        // `get` on anything but an object is `None`
        request
            .get("level")
            .ok_or(LevelRejection::MissingField)?
            .as_f64()
            .and_then(Self::new)
            .ok_or(LevelRejection::InvalidRange)
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ========================================
// Response Types
// ========================================

/// JSON error payload for every non-2xx response
///
/// # Examples
///
/// ```
/// use audioremote_common::api::types::ErrorResponse;
///
/// let error = ErrorResponse::new("invalid_action", "Unknown media action: stop");
/// assert_eq!(error.error, "invalid_action");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Body of `GET /info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub auth_required: bool,
    pub ip: String,
    pub port: u16,
    pub url: String,
}

impl InfoResponse {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        let ip = ip.into();
        Self {
            name: SERVER_NAME.to_string(),
            version: PROTOCOL_VERSION.to_string(),
            auth_required: true,
            url: format!("http://{}:{}", ip, port),
            ip,
            port,
        }
    }
}

// ========================================
// Tests
// ========================================
