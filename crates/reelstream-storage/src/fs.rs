//! Filesystem-backed object store.
//!
//! Each object is a regular file directly under the store root; the
//! [`ObjectId`] is the file name. Ids are validated upstream, so joining
//! them onto the root cannot escape it.

use std::io::{ErrorKind, SeekFrom};
use std::path::PathBuf;

use async_trait::async_trait;
use reelstream_common::paths::content_type_for;
use reelstream_common::{Error, ObjectId, Result};
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

use crate::{ObjectMeta, ObjectReader, ObjectStore};

/// Objects stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is not checked here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn stat(&self, id: &ObjectId) -> Result<ObjectMeta> {
        let path = self.path_for(id);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::not_found("object", id));
            }
            Err(e) => {
                // Anything we cannot stat is not servable.
                tracing::warn!("Lookup of {} failed: {e}", path.display());
                return Err(Error::not_found("object", id));
            }
        };

        if !metadata.is_file() {
            return Err(Error::not_found("object", id));
        }

        Ok(ObjectMeta {
            size: metadata.len(),
            content_type: content_type_for(&path).to_string(),
        })
    }

    async fn open_at(&self, id: &ObjectId, offset: u64) -> Result<ObjectReader> {
        let path = self.path_for(id);

        let mut file = File::open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::not_found("object", id),
            _ => Error::from(e),
        })?;

        if offset > 0 {
            file.seek(SeekFrom::Start(offset)).await?;
        }

        tracing::trace!("Opened {} at offset {offset}", path.display());
        Ok(Box::new(file))
    }

    fn backend(&self) -> &'static str {
        "fs"
    }
}
