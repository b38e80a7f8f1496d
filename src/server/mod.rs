use crate::config::Config;
use crate::streaming::RangeStreamer;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use reelstream_storage::{FsStore, ObjectStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod access;
pub mod error;
pub mod routes_stream;

pub use access::{AllowAll, StreamAccess};
pub use error::AppError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Serves every stream request
    pub streamer: Arc<RangeStreamer>,
    /// Consulted before each stream request
    pub access: Arc<dyn StreamAccess>,
}

impl AppContext {
    /// Build a context over `store` that allows every request.
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let streamer = RangeStreamer::new(store, config.streaming.clone());
        Self {
            config: Arc::new(config),
            streamer: Arc::new(streamer),
            access: Arc::new(AllowAll),
        }
    }

    /// Replace the access predicate.
    pub fn with_access(mut self, access: Arc<dyn StreamAccess>) -> Self {
        self.access = access;
        self
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    // Browser players need to send Range and read the framing headers back.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers([header::RANGE])
        .expose_headers([
            header::CONTENT_RANGE,
            header::ACCEPT_RANGES,
            header::CONTENT_LENGTH,
        ]);

    Router::new()
        .route("/health", get(health_check))
        .route("/stream/:object_id", get(routes_stream::stream_object))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server over a filesystem store
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    tracing::info!("Serving objects from {:?}", config.storage.root);
    let store: Arc<dyn ObjectStore> = Arc::new(FsStore::new(&config.storage.root));
    let ctx = AppContext::new(config, store);

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
