//! Integration tests for token persistence
//!
//! Tests cover:
//! - First startup creates and persists a token
//! - Second startup returns the identical token
//! - Replacement invalidates the previous token immediately
//! - Reload picks up external edits to the token file
//! - Filesystem failures surface as errors

use std::sync::Arc;
use std::thread;

use audioremote_common::token::{generate_token, TokenStore, TOKEN_ENTROPY_BYTES};
use audioremote_common::Error;

#[test]
fn test_first_startup_creates_token_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    assert!(!path.exists());

    let store = TokenStore::load_or_create(&path).unwrap();

    assert!(path.exists());
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, &*store.current());

    // URL-safe base64 of 32 bytes: 43 characters, at least 256 bits
    assert_eq!(TOKEN_ENTROPY_BYTES, 32);
    assert_eq!(store.current().len(), 43);
}

#[test]
fn test_second_startup_returns_identical_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");

    let first = TokenStore::load_or_create(&path).unwrap().current();
    let second = TokenStore::load_or_create(&path).unwrap().current();

    assert_eq!(first, second);
}

#[test]
fn test_existing_file_is_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    std::fs::write(&path, "  my-token\r\n").unwrap();

    let store = TokenStore::load_or_create(&path).unwrap();

    assert_eq!(&*store.current(), "my-token");
    assert!(store.verify("my-token"));
}

#[test]
fn test_empty_file_regenerates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    std::fs::write(&path, "   \n").unwrap();

    let store = TokenStore::load_or_create(&path).unwrap();

    assert!(!store.current().is_empty());
    assert!(!store.verify(""));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), &*store.current());
}

#[test]
fn test_missing_parent_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("token.txt");

    let store = TokenStore::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_replace_invalidates_old_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    let store = TokenStore::load_or_create(&path).unwrap();
    let old = store.current();

    store.replace("brand-new-token").unwrap();

    assert!(!store.verify(&old));
    assert!(store.verify("brand-new-token"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "brand-new-token");

    // Survives a restart
    let reopened = TokenStore::load_or_create(&path).unwrap();
    assert!(reopened.verify("brand-new-token"));
}

#[test]
fn test_replace_rejects_empty_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    let store = TokenStore::load_or_create(&path).unwrap();
    let before = store.current();

    let result = store.replace("   ");

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(store.current(), before);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), &*before);
}

#[test]
fn test_regenerate_produces_new_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::load_or_create(dir.path().join("server_token.txt")).unwrap();
    let old = store.current();

    let new = store.regenerate().unwrap();

    assert_ne!(old, new);
    assert!(store.verify(&new));
    assert!(!store.verify(&old));
}

#[test]
fn test_reload_picks_up_external_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    let store = TokenStore::load_or_create(&path).unwrap();

    // Another process (e.g. `audioremote token set`) rewrites the file
    let other = TokenStore::load_or_create(&path).unwrap();
    other.replace("edited-elsewhere").unwrap();
    assert!(!store.verify("edited-elsewhere"));

    assert!(store.reload().unwrap());
    assert!(store.verify("edited-elsewhere"));

    // Nothing changed on the second reload
    assert!(!store.reload().unwrap());
}

#[test]
fn test_reload_keeps_token_when_file_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_token.txt");
    let store = TokenStore::load_or_create(&path).unwrap();
    let before = store.current();

    std::fs::remove_file(&path).unwrap();

    assert!(!store.reload().unwrap());
    assert_eq!(store.current(), before);
}

#[test]
fn test_unreadable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    // A directory where the file should be
    let result = TokenStore::load_or_create(dir.path());

    assert!(matches!(result, Err(Error::TokenFile { .. })));
}

#[test]
fn test_concurrent_readers_never_see_torn_values() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::load_or_create(dir.path().join("server_token.txt")).unwrap();

    let candidates: Arc<Vec<String>> = Arc::new((0..8).map(|_| generate_token()).collect());
    store.replace(&candidates[0]).unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let candidates = Arc::clone(&candidates);
            thread::spawn(move || {
                for _ in 0..500 {
                    let seen = store.current();
                    assert!(candidates.iter().any(|c| c.as_str() == &*seen));
                }
            })
        })
        .collect();

    for candidate in candidates.iter().cycle().take(64) {
        store.replace(candidate).unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
