//! HTTP endpoints
//!
//! Failures are returned as JSON `{ "error": <code>, "message": <text> }`.
//! Successful control calls return plain text.

pub mod auth;
pub mod command;
pub mod info;
pub mod volume;

use audioremote_common::api::{AuthRejection, ErrorResponse, LevelRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::control::CapabilityError;

/// Request-level failure, rendered as a status code and JSON body
#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed or wrong bearer token (401)
    Unauthorized(AuthRejection),
    /// Action name outside the known set (400)
    InvalidAction(String),
    /// Volume body without a usable `level` (400)
    MissingField,
    /// `level` not a number in [0, 100] (400)
    InvalidRange,
    /// Operating system capability failed; message returned verbatim (500)
    Capability(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidAction(_) | ApiError::MissingField | ApiError::InvalidRange => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Capability(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(rejection) => rejection.code(),
            ApiError::InvalidAction(_) => "invalid_action",
            ApiError::MissingField => "missing_field",
            ApiError::InvalidRange => "invalid_range",
            ApiError::Capability(_) => "capability_error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(rejection) => rejection.to_string(),
            ApiError::InvalidAction(action) => format!("Unknown media action: {}", action),
            ApiError::MissingField => "Volume level not provided".to_string(),
            ApiError::InvalidRange => "Volume level must be a number between 0 and 100".to_string(),
            ApiError::Capability(message) => message.clone(),
        }
    }
}

impl From<AuthRejection> for ApiError {
    fn from(rejection: AuthRejection) -> Self {
        ApiError::Unauthorized(rejection)
    }
}

impl From<LevelRejection> for ApiError {
    fn from(rejection: LevelRejection) -> Self {
        match rejection {
            LevelRejection::MissingField => ApiError::MissingField,
            LevelRejection::InvalidRange => ApiError::InvalidRange,
        }
    }
}

impl From<CapabilityError> for ApiError {
    fn from(error: CapabilityError) -> Self {
        ApiError::Capability(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.code(), self.message());
        (self.status(), Json(body)).into_response()
    }
}

/// Run a blocking capability call on the blocking thread pool
///
/// A panic in the call surfaces as a capability error.
pub(crate) async fn run_blocking<F>(call: F) -> Result<(), ApiError>
where
    F: FnOnce() -> Result<(), CapabilityError> + Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(ApiError::Capability(format!("Capability task failed: {}", e))),
    }
}
