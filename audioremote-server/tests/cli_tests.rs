//! Environment variable handling for command-line flags
//!
//! Mutates process environment, so every test is `#[serial]`.

use audioremote_common::config::{BackendKind, TomlConfig};
use audioremote_server::cli::Args;
use clap::Parser;
use serial_test::serial;

const VARS: [&str; 5] = [
    "AUDIOREMOTE_PORT",
    "AUDIOREMOTE_HOST",
    "AUDIOREMOTE_TOKEN_FILE",
    "AUDIOREMOTE_BACKEND",
    "AUDIOREMOTE_CONFIG",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_environment_supplies_flags() {
    clear_env();
    std::env::set_var("AUDIOREMOTE_PORT", "5123");
    std::env::set_var("AUDIOREMOTE_TOKEN_FILE", "/tmp/audioremote-test-token.txt");
    std::env::set_var("AUDIOREMOTE_BACKEND", "log");

    let args = Args::try_parse_from(["audioremote"]).unwrap();
    let mut config = TomlConfig::default();
    args.apply_to(&mut config);
    clear_env();

    assert_eq!(config.port, 5123);
    assert_eq!(
        config.token_file,
        std::path::PathBuf::from("/tmp/audioremote-test-token.txt")
    );
    assert_eq!(config.backend.kind, BackendKind::Log);
    assert_eq!(config.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_flag_beats_environment() {
    clear_env();
    std::env::set_var("AUDIOREMOTE_PORT", "5123");

    let args = Args::try_parse_from(["audioremote", "--port", "6000"]).unwrap();
    clear_env();

    assert_eq!(args.port, Some(6000));
}

#[test]
#[serial]
fn test_invalid_port_in_environment_rejected() {
    clear_env();
    std::env::set_var("AUDIOREMOTE_PORT", "not-a-port");

    let result = Args::try_parse_from(["audioremote"]);
    clear_env();

    assert!(result.is_err());
}
