use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest accepted read chunk.
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Largest accepted read chunk; bounds per-request memory.
pub const MAX_CHUNK_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub streaming: StreamingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the stored objects
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("./media")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamingConfig {
    /// Bytes read from storage per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Accept suffix ranges (`bytes=-N`); when false they are rejected as malformed
    #[serde(default = "default_suffix_ranges")]
    pub suffix_ranges: bool,

    /// Optional `Cache-Control` value for successful responses
    #[serde(default)]
    pub cache_control: Option<String>,
}

fn default_chunk_size() -> usize {
    64 * 1024
}

fn default_suffix_ranges() -> bool {
    true
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            suffix_ranges: default_suffix_ranges(),
            cache_control: None,
        }
    }
}
