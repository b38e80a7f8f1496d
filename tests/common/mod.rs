//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wraps an [`AppContext`] over a
//! [`MemoryStore`] seeded with a few objects, and [`FailingStore`], whose
//! readers break part-way through an object.

#![allow(dead_code)]

use std::io::{self, Cursor};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use axum::Router;
use reelstream::config::Config;
use reelstream::server::{create_router, AppContext};
use reelstream_common::{Error, ObjectId, Result};
use reelstream_storage::{MemoryStore, ObjectMeta, ObjectReader, ObjectStore};
use tokio::io::{AsyncRead, ReadBuf};

/// Size of the seeded `clip.mp4` object.
pub const CLIP_SIZE: usize = 1000;

/// Deterministic, position-dependent bytes so windows are easy to check.
pub fn clip_bytes() -> Vec<u8> {
    (0..CLIP_SIZE).map(|i| (i % 251) as u8).collect()
}

pub fn id(key: &str) -> ObjectId {
    key.parse().unwrap()
}

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Harness with default configuration and the standard objects.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Harness with custom configuration and the standard objects.
    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        store.insert_guessed(id("clip.mp4"), clip_bytes());
        store.insert_guessed(id("movie.mkv"), vec![0u8; 100]);
        store.insert_guessed(id("empty.webm"), Vec::new());

        let ctx = AppContext::new(config, store.clone());
        Self { ctx, store }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let addr = serve(harness.router()).await;
        (harness, addr)
    }
}

/// Serve `app` on a random local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind random port");
    let addr = listener.local_addr().expect("failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    addr
}

/// Store whose objects claim `size` bytes but whose readers misbehave.
pub struct FailingStore {
    pub size: u64,
    /// Bytes a reader yields before breaking.
    pub good_bytes: usize,
    /// Break with an I/O error (true) or a silent EOF (false).
    pub error: bool,
}

#[async_trait]
impl ObjectStore for FailingStore {
    async fn stat(&self, id: &ObjectId) -> Result<ObjectMeta> {
        if id.as_str() == "missing.mp4" {
            return Err(Error::not_found("object", id));
        }
        Ok(ObjectMeta {
            size: self.size,
            content_type: "video/mp4".into(),
        })
    }

    async fn open_at(&self, _id: &ObjectId, offset: u64) -> Result<ObjectReader> {
        let available = self.good_bytes.saturating_sub(offset as usize);
        Ok(Box::new(BrokenReader {
            data: Cursor::new(vec![9u8; available]),
            error: self.error,
        }))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

struct BrokenReader {
    data: Cursor<Vec<u8>>,
    error: bool,
}

impl AsyncRead for BrokenReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let exhausted = this.data.position() as usize >= this.data.get_ref().len();
        if exhausted && this.error {
            return Poll::Ready(Err(io::Error::other("disk went away")));
        }
        Pin::new(&mut this.data).poll_read(cx, buf)
    }
}

/// [`MemoryStore`] wrapper that counts how often objects are opened for reading.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    opens: AtomicUsize,
}

impl CountingStore {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for CountingStore {
    async fn stat(&self, id: &ObjectId) -> Result<ObjectMeta> {
        self.inner.stat(id).await
    }

    async fn open_at(&self, id: &ObjectId, offset: u64) -> Result<ObjectReader> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.inner.open_at(id, offset).await
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}
