//! Log output of rejected requests
//!
//! Rejections are logged with the peer address and rejection kind; the
//! presented credential must never appear in the log.

mod helpers;

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use helpers::{post, TestApp};
use tower::util::ServiceExt; // for `oneshot` method

/// Formatted log lines collected in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

async fn send_from_peer(app: &TestApp, authorization: &str, peer: SocketAddr) -> StatusCode {
    let mut request = post("/command/next", Some(authorization), "");
    request.extensions_mut().insert(ConnectInfo(peer));
    app.router().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_rejection_log_has_peer_and_kind_but_not_credential() {
    let (logs, _guard) = capture();
    let app = TestApp::new();
    let peer: SocketAddr = "10.0.0.7:51234".parse().unwrap();

    let status = send_from_peer(&app, "Bearer some-wrong-secret", peer).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let output = logs.contents();
    assert!(output.contains("auth_invalid"), "log: {}", output);
    assert!(output.contains("10.0.0.7:51234"), "log: {}", output);
    assert!(!output.contains("some-wrong-secret"), "credential leaked: {}", output);
}

#[tokio::test]
async fn test_malformed_header_with_real_token_not_logged() {
    let (logs, _guard) = capture();
    let app = TestApp::new();
    let token = app.token();
    let peer: SocketAddr = "192.168.1.50:40000".parse().unwrap();

    let status = send_from_peer(&app, &format!("Token {}", token), peer).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let output = logs.contents();
    assert!(output.contains("auth_malformed"), "log: {}", output);
    assert!(!output.contains(token.as_str()), "credential leaked: {}", output);
}
