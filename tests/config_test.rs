//! Configuration loading tests.

use reelstream::config::{load_config, load_config_or_default, Config};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn load_full_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
port = 9090

[storage]
root = "/srv/videos"

[streaming]
chunk_size = 131072
suffix_ranges = false
cache_control = "public, max-age=3600"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.storage.root, PathBuf::from("/srv/videos"));
    assert_eq!(config.streaming.chunk_size, 131072);
    assert!(!config.streaming.suffix_ranges);
    assert_eq!(
        config.streaming.cache_control.as_deref(),
        Some("public, max-age=3600")
    );
}

#[test]
fn empty_config_file_is_valid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    std::fs::write(&path, "").unwrap();

    let config = load_config(&path).unwrap();
    let defaults = Config::default();
    assert_eq!(config.server.port, defaults.server.port);
    assert_eq!(config.streaming, defaults.streaming);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().unwrap();

    let path = dir.path().join("port.toml");
    std::fs::write(&path, "[server]\nport = 0\n").unwrap();
    assert!(load_config(&path).is_err());

    let path = dir.path().join("chunk.toml");
    std::fs::write(&path, "[streaming]\nchunk_size = 10\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("chunk_size"));

    let path = dir.path().join("syntax.toml");
    std::fs::write(&path, "[server\nport = 1").unwrap();
    assert!(load_config(&path).is_err());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(load_config_or_default(Some(path.as_path())).is_err());
}
