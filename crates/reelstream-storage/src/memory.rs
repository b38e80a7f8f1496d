//! In-memory object store.
//!
//! Objects are held as [`Bytes`], so every reader gets a cheap
//! reference-counted slice and concurrent reads never contend.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use reelstream_common::paths::content_type_for;
use reelstream_common::{Error, ObjectId, Result};

use crate::{ObjectMeta, ObjectReader, ObjectStore};

#[derive(Debug, Clone)]
struct MemoryObject {
    data: Bytes,
    content_type: String,
}

/// Objects held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ObjectId, MemoryObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object with an explicit content type, replacing any previous one.
    pub fn insert(&self, id: ObjectId, data: impl Into<Bytes>, content_type: impl Into<String>) {
        let object = MemoryObject {
            data: data.into(),
            content_type: content_type.into(),
        };
        self.objects.write().insert(id, object);
    }

    /// Store an object, guessing the content type from the id's extension.
    pub fn insert_guessed(&self, id: ObjectId, data: impl Into<Bytes>) {
        let content_type = content_type_for(Path::new(id.as_str()));
        self.insert(id, data, content_type);
    }

    /// Remove an object. Returns whether it existed.
    pub fn remove(&self, id: &ObjectId) -> bool {
        self.objects.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    fn get(&self, id: &ObjectId) -> Result<MemoryObject> {
        self.objects
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("object", id))
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn stat(&self, id: &ObjectId) -> Result<ObjectMeta> {
        let object = self.get(id)?;
        Ok(ObjectMeta {
            size: object.data.len() as u64,
            content_type: object.content_type,
        })
    }

    async fn open_at(&self, id: &ObjectId, offset: u64) -> Result<ObjectReader> {
        let object = self.get(id)?;
        let len = object.data.len();
        let start = usize::try_from(offset).unwrap_or(len).min(len);
        Ok(Box::new(Cursor::new(object.data.slice(start..))))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn id(key: &str) -> ObjectId {
        key.parse().unwrap()
    }

    #[tokio::test]
    async fn insert_and_stat() {
        let store = MemoryStore::new();
        store.insert(id("a.bin"), vec![1u8; 10], "video/mp4");

        let meta = store.stat(&id("a.bin")).await.unwrap();
        assert_eq!(meta.size, 10);
        assert_eq!(meta.content_type, "video/mp4");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn guessed_content_type() {
        let store = MemoryStore::new();
        store.insert_guessed(id("movie.mkv"), Bytes::from_static(b"abc"));

        let meta = store.stat(&id("movie.mkv")).await.unwrap();
        assert_eq!(meta.content_type, "video/x-matroska");
    }

    #[tokio::test]
    async fn open_at_offset_and_past_end() {
        let store = MemoryStore::new();
        store.insert_guessed(id("ramp.mp4"), (0..100u8).collect::<Vec<_>>());

        let mut buf = Vec::new();
        let mut reader = store.open_at(&id("ramp.mp4"), 90).await.unwrap();
        reader.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, (90..100u8).collect::<Vec<_>>());

        buf.clear();
        let mut reader = store.open_at(&id("ramp.mp4"), 500).await.unwrap();
        reader.read_to_end(&mut buf).await.unwrap();
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn missing_and_removed_objects() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(matches!(
            store.stat(&id("x.mp4")).await,
            Err(Error::NotFound { .. })
        ));

        store.insert_guessed(id("x.mp4"), vec![0u8; 4]);
        assert!(store.remove(&id("x.mp4")));
        assert!(!store.remove(&id("x.mp4")));
        assert!(store.open_at(&id("x.mp4"), 0).await.is_err());
    }
}
