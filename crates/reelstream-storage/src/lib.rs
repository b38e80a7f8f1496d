//! Reelstream-Storage: the storage lookup collaborator.
//!
//! The streaming core never touches a filesystem or object store directly.
//! It asks an [`ObjectStore`] two things: how big an object is and what it
//! contains ([`ObjectStore::stat`]), and for a reader positioned at a byte
//! offset ([`ObjectStore::open_at`]). Backends must allow any number of
//! concurrent independent readers on the same object.
//!
//! Two backends ship with the crate:
//!
//! - [`FsStore`]: objects are regular files under a root directory
//! - [`MemoryStore`]: objects live in an in-process map (tests, embedding)

pub mod fs;
pub mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use reelstream_common::{ObjectId, Result};

/// A reader over an object's bytes, starting at the offset it was opened at.
pub type ObjectReader = Box<dyn tokio::io::AsyncRead + Send + Unpin>;

/// Metadata of a stored object, as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Total size in bytes.
    pub size: u64,
    /// MIME type served as `Content-Type`.
    pub content_type: String,
}

/// Storage lookup and read access for stored objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Look up an object's metadata.
    ///
    /// Returns [`reelstream_common::Error::NotFound`] when the id does not
    /// resolve to a readable object.
    async fn stat(&self, id: &ObjectId) -> Result<ObjectMeta>;

    /// Open an object for reading, positioned at `offset`.
    async fn open_at(&self, id: &ObjectId, offset: u64) -> Result<ObjectReader>;

    /// Short backend name used in log records.
    fn backend(&self) -> &'static str;
}
