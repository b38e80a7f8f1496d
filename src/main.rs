mod cli;

use reelstream::{config, server};
use reelstream_common::ObjectId;
use reelstream_storage::{FsStore, ObjectStore};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    root: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(root) = root {
        config.storage.root = root;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting reelstream server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelstream=trace,reelstream_storage=trace,tower_http=debug".to_string()
        } else {
            "reelstream=debug,reelstream_storage=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port, root } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, root, cli.config.as_deref()))
        }
        Commands::Stat {
            object_id,
            root,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(stat_object(&object_id, root, cli.config.as_deref(), json))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelstream {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn stat_object(
    object_id: &str,
    root: Option<PathBuf>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let root = root.unwrap_or(config.storage.root);

    let id: ObjectId = object_id.parse()?;
    let store = FsStore::new(&root);
    let meta = store.stat(&id).await?;

    if json {
        let value = serde_json::json!({
            "object_id": id,
            "size": meta.size,
            "content_type": meta.content_type,
            "root": root,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Object: {}", id);
        println!("Size: {} bytes", meta.size);
        println!("Content-Type: {}", meta.content_type);
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Storage root: {:?}", config.storage.root);
            println!("  Chunk size: {} bytes", config.streaming.chunk_size);
            println!("  Suffix ranges: {}", config.streaming.suffix_ranges);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Storage root: {:?}", config.storage.root);
        }
    }

    Ok(())
}
