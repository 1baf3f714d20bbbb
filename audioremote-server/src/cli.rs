//! Command-line interface
//!
//! Flags override the config file; every flag can also come from an
//! `AUDIOREMOTE_*` environment variable.

use std::path::PathBuf;

use audioremote_common::config::{BackendKind, TomlConfig};
use clap::{Parser, Subcommand};

/// Command-line arguments for audioremote
#[derive(Parser, Debug)]
#[command(name = "audioremote")]
#[command(about = "Remote media key and volume control over HTTP")]
#[command(version)]
pub struct Args {
    /// Config file (default: ./audioremote.toml, then the user config dir)
    #[arg(short, long, env = "AUDIOREMOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "AUDIOREMOTE_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "AUDIOREMOTE_HOST")]
    pub host: Option<String>,

    /// Token file location
    #[arg(long, env = "AUDIOREMOTE_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Capability backend: command or log
    #[arg(long, env = "AUDIOREMOTE_BACKEND")]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the server (default)
    Serve,
    /// Inspect or replace the authentication token
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TokenCommand {
    /// Print the current token, creating one if absent
    Show,
    /// Replace the token with a fresh random value
    Regenerate,
    /// Replace the token with a custom value
    Set {
        /// New token (surrounding whitespace is trimmed)
        value: String,
    },
}

impl Args {
    /// Subcommand to run; `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Apply command-line overrides on top of file configuration
    pub fn apply_to(&self, config: &mut TomlConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(token_file) = &self.token_file {
            config.token_file = token_file.clone();
        }
        if let Some(backend) = self.backend {
            config.backend.kind = backend;
        }
    }
}
