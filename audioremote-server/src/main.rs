//! audioremote - remote media key and volume control server
//!
//! Startup order: configuration, logging, token, listener, then serve until
//! Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use audioremote_common::api::InfoResponse;
use audioremote_common::config::{ConfigSource, TomlConfig};
use audioremote_common::net::local_ip;
use audioremote_common::TokenStore;
use audioremote_server::cli::{Args, Command, TokenCommand};
use audioremote_server::{build_router, control, server, AppState};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_to(&mut config);

    init_tracing(&config.logging.level);

    info!(
        "Starting AudioRemote Server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &source {
        ConfigSource::File(path) => info!("Configuration loaded from {}", path.display()),
        ConfigSource::Defaults => warn!("No config file found, using defaults"),
    }

    let tokens = TokenStore::load_or_create(&config.token_file).with_context(|| {
        format!(
            "Failed to initialize token file {}",
            config.token_file.display()
        )
    })?;

    match args.command() {
        Command::Serve => run_server(config, tokens).await,
        Command::Token { action } => run_token_command(action, &tokens),
    }
}

/// `RUST_LOG` wins; otherwise the configured level
///
/// Logs go to stderr so stdout carries only the banner and token output.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_token_command(action: TokenCommand, tokens: &TokenStore) -> Result<()> {
    match action {
        TokenCommand::Show => {
            println!("{}", tokens.current());
        }
        TokenCommand::Regenerate => {
            let token = tokens.regenerate().context("Failed to regenerate token")?;
            println!("{}", token);
            print_reload_hint();
        }
        TokenCommand::Set { value } => {
            tokens.replace(&value).context("Failed to set token")?;
            println!("Token updated");
            print_reload_hint();
        }
    }
    Ok(())
}

fn print_reload_hint() {
    if cfg!(unix) {
        println!("A running server picks this up on SIGHUP (or restart).");
    } else {
        println!("Restart a running server to apply the new token.");
    }
}

async fn run_server(config: TomlConfig, tokens: TokenStore) -> Result<()> {
    let listener = server::bind(&config.host, config.port).await?;
    let port = listener
        .local_addr()
        .context("Failed to read bound address")?
        .port();

    let ip = tokio::task::spawn_blocking(local_ip)
        .await
        .context("Local IP discovery task failed")?;
    let info = InfoResponse::new(ip.to_string(), port);

    info!("Capability backend: {}", config.backend.kind);
    let (keys, endpoint) = control::from_config(&config.backend);

    print_banner(&tokens, &info);

    #[cfg(unix)]
    let _reload = server::spawn_token_reload(tokens.clone())
        .context("Failed to install SIGHUP handler")?;

    let state = AppState::new(tokens, keys, endpoint, info);
    let app = server::with_layers(build_router(state), config.cors);

    server::serve(listener, app, server::shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connection details for pairing the mobile client
fn print_banner(tokens: &TokenStore, info: &InfoResponse) {
    println!();
    println!("=== {} v{} ===", info.name, info.version);
    println!("  Server URL:  {}", info.url);
    println!("  IP address:  {}", info.ip);
    println!("  Port:        {}", info.port);
    println!("  Token:       {}", tokens.current());
    println!("  Token file:  {}", tokens.path().display());
    println!();
    println!("Enter the URL and token in the mobile app. Press Ctrl+C to stop.");
    println!();
}
