//! Byte-range streaming of stored objects.
//!
//! A request is answered in two phases. First the object is looked up and the
//! optional `Range` header is resolved into a [`ServeMode`]; every error a
//! client can cause (missing object, malformed or unsatisfiable range) is
//! reported here, before any byte is sent. Then the body streams the window
//! from storage in bounded chunks.
//!
//! # Route
//!
//! - `GET /stream/{object_id}`: 200 with the whole object, or 206 with the
//!   window selected by `Range: bytes=...`

mod body;
mod framing;
mod range;
mod streamer;

pub use body::window_stream;
pub use framing::ResponseFraming;
pub use range::{ByteRange, RangeRequest, ServingWindow};
pub use streamer::{RangeStreamer, ServeMode, StreamResponse};
