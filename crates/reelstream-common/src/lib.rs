//! Reelstream-Common: shared types used across reelstream.
//!
//! - **Errors**: the unified [`Error`] type and its HTTP status mapping
//! - **Object IDs**: validated storage keys ([`ObjectId`])
//! - **Content types**: MIME guessing by file extension ([`paths`])
//!
//! # Examples
//!
//! ```
//! use reelstream_common::{Error, ObjectId, Result};
//! use reelstream_common::paths::content_type_for;
//! use std::path::Path;
//!
//! let id: ObjectId = "trailer.mp4".parse().unwrap();
//! assert_eq!(id.as_str(), "trailer.mp4");
//!
//! assert_eq!(content_type_for(Path::new("movie.mkv")), "video/x-matroska");
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("object", "missing.mp4"))
//! }
//! assert_eq!(lookup().unwrap_err().http_status(), 404);
//! ```

pub mod error;
pub mod ids;
pub mod paths;

pub use error::{Error, Result};
pub use ids::ObjectId;
