//! HTTP server lifecycle
//!
//! Bind, serve until a shutdown future resolves, then drain in-flight
//! requests. On Unix, SIGHUP re-reads the token file.

use std::future::Future;
use std::net::SocketAddr;

use audioremote_common::TokenStore;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::error::{Error, Result};

/// Bind the listening socket
///
/// Port 0 binds an ephemeral port; read it back from `local_addr()`.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let addr = format!("{}:{}", host, port);
    TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind { addr, source })
}

/// Wrap the application router with request tracing and, optionally, CORS
pub fn with_layers(router: Router, cors: bool) -> Router {
    let router = router.layer(TraceLayer::new_for_http());
    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Serve `app` on `listener` until `shutdown` resolves
///
/// Returns once in-flight requests have completed.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("HTTP server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
///
/// If a handler cannot be installed that source is ignored and the other
/// one still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

/// Re-read the token file on every SIGHUP
///
/// Lets `audioremote token set` / `token regenerate` take effect in a
/// running server without a restart.
#[cfg(unix)]
pub fn spawn_token_reload(tokens: TokenStore) -> std::io::Result<tokio::task::JoinHandle<()>> {
    let mut hangup = signal::unix::signal(signal::unix::SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            let store = tokens.clone();
            match tokio::task::spawn_blocking(move || store.reload()).await {
                Ok(Ok(true)) => {}
                Ok(Ok(false)) => info!("SIGHUP: token unchanged"),
                Ok(Err(e)) => warn!("Token reload failed, keeping current token: {}", e),
                Err(e) => error!("Token reload task failed: {}", e),
            }
        }
    }))
}
