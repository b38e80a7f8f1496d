mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config.storage.root = expand_path(&config.storage.root);

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./reelstream.toml",
        "~/.config/reelstream/config.toml",
        "/etc/reelstream/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let chunk_size = config.streaming.chunk_size;
    if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
        anyhow::bail!(
            "streaming.chunk_size {} is outside {}..={}",
            chunk_size,
            MIN_CHUNK_SIZE,
            MAX_CHUNK_SIZE
        );
    }

    if !config.storage.root.is_dir() {
        tracing::warn!("Storage root does not exist: {:?}", config.storage.root);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.root, PathBuf::from("./media"));
        assert_eq!(config.streaming, StreamingConfig::default());
        assert!(config.streaming.suffix_ranges);
        assert_eq!(config.streaming.chunk_size, 65536);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [streaming]
            cache_control = "max-age=60"
            "#,
        )
        .unwrap();
        assert_eq!(config.streaming.cache_control.as_deref(), Some("max-age=60"));
        assert_eq!(config.streaming.chunk_size, 65536);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn validate_rejects_chunk_size_out_of_bounds() {
        let mut config = Config::default();
        config.streaming.chunk_size = 16;
        assert!(validate_config(&config).is_err());

        config.streaming.chunk_size = MAX_CHUNK_SIZE + 1;
        assert!(validate_config(&config).is_err());

        config.streaming.chunk_size = MIN_CHUNK_SIZE;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn missing_storage_root_is_only_a_warning() {
        let mut config = Config::default();
        config.storage.root = PathBuf::from("/definitely/not/here");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn expand_path_keeps_absolute_paths() {
        let expanded = expand_path(Path::new("~/videos"));
        assert!(expanded.ends_with("videos"));
        assert_eq!(expand_path(Path::new("/srv/media")), PathBuf::from("/srv/media"));
    }
}
