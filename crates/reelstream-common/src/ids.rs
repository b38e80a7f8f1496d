//! Validated object identifiers.
//!
//! An [`ObjectId`] is the key a client puts in `/stream/{object_id}`. It is
//! checked once at the edge so storage backends can map it straight onto a
//! file name without worrying about traversal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Longest accepted identifier, in bytes (a common filesystem name limit).
pub const MAX_OBJECT_ID_LEN: usize = 255;

/// Key of a stored object.
///
/// Always a single, non-hidden path component: no separators, no `..`, no NUL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Validate and wrap a key.
    pub fn new(key: impl Into<String>) -> Result<Self, Error> {
        let key = key.into();

        if key.is_empty() {
            return Err(Error::InvalidObjectId("empty".into()));
        }
        if key.len() > MAX_OBJECT_ID_LEN {
            return Err(Error::InvalidObjectId(format!(
                "longer than {MAX_OBJECT_ID_LEN} bytes"
            )));
        }
        if key.contains('/') || key.contains('\\') || key.contains('\0') {
            return Err(Error::InvalidObjectId(key));
        }
        if key.contains("..") || key.starts_with('.') {
            return Err(Error::InvalidObjectId(key));
        }

        Ok(Self(key))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
