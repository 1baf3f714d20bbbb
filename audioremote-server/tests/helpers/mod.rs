//! Shared fixtures for audioremote-server integration tests
//!
//! - RecordingKeys / RecordingEndpoint: capability fakes that record calls
//! - TestApp: router + state over a temporary token file

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use audioremote_common::api::InfoResponse;
use audioremote_common::TokenStore;
use audioremote_server::control::{AudioEndpoint, CapabilityError, KeyInjector, MediaKey};
use audioremote_server::{build_router, AppState};
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;

/// Records every press/release; optionally fails presses
#[derive(Default)]
pub struct RecordingKeys {
    pub events: Mutex<Vec<(&'static str, MediaKey)>>,
    pub fail_with: Option<String>,
}

impl RecordingKeys {
    pub fn events(&self) -> Vec<(&'static str, MediaKey)> {
        self.events.lock().unwrap().clone()
    }
}

impl KeyInjector for RecordingKeys {
    fn press(&self, key: MediaKey) -> Result<(), CapabilityError> {
        if let Some(message) = &self.fail_with {
            return Err(CapabilityError::Failed(message.clone()));
        }
        self.events.lock().unwrap().push(("press", key));
        Ok(())
    }

    fn release(&self, key: MediaKey) -> Result<(), CapabilityError> {
        self.events.lock().unwrap().push(("release", key));
        Ok(())
    }
}

/// Records applied volume fractions and session brackets
#[derive(Default)]
pub struct RecordingEndpoint {
    pub levels: Mutex<Vec<f32>>,
    pub inits: AtomicUsize,
    pub uninits: AtomicUsize,
    pub fail_with: Option<String>,
}

impl RecordingEndpoint {
    pub fn levels(&self) -> Vec<f32> {
        self.levels.lock().unwrap().clone()
    }

    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn uninits(&self) -> usize {
        self.uninits.load(Ordering::SeqCst)
    }
}

impl AudioEndpoint for RecordingEndpoint {
    fn initialize(&self) -> Result<(), CapabilityError> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_master_volume_scalar(&self, fraction: f32) -> Result<(), CapabilityError> {
        if let Some(message) = &self.fail_with {
            return Err(CapabilityError::Failed(message.clone()));
        }
        self.levels.lock().unwrap().push(fraction);
        Ok(())
    }

    fn uninitialize(&self) {
        self.uninits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Application wired to recording fakes
pub struct TestApp {
    pub state: AppState,
    pub keys: Arc<RecordingKeys>,
    pub endpoint: Arc<RecordingEndpoint>,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_fakes(RecordingKeys::default(), RecordingEndpoint::default())
    }

    pub fn with_fakes(keys: RecordingKeys, endpoint: RecordingEndpoint) -> Self {
        let dir = TempDir::new().unwrap();
        let tokens = TokenStore::load_or_create(dir.path().join("server_token.txt")).unwrap();
        let keys = Arc::new(keys);
        let endpoint = Arc::new(endpoint);

        let state = AppState::new(
            tokens,
            keys.clone(),
            endpoint.clone(),
            InfoResponse::new("192.168.1.20", 5000),
        );

        Self {
            state,
            keys,
            endpoint,
            _dir: dir,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// The currently active token
    pub fn token(&self) -> String {
        self.state.tokens.current().to_string()
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

/// POST with an optional Authorization header and raw body
pub fn post(uri: &str, authorization: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
