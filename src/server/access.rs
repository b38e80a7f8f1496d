//! Stream access predicate.
//!
//! Deciding who may stream what belongs to the surrounding application. The
//! server only asks a [`StreamAccess`] before touching storage, and refuses
//! with 403 when the answer is no.

use axum::http::HeaderMap;
use reelstream_common::ObjectId;

/// Capability check consulted once per stream request.
pub trait StreamAccess: Send + Sync {
    /// Whether the caller described by `headers` may stream `object_id`.
    fn can_stream(&self, object_id: &ObjectId, headers: &HeaderMap) -> bool;
}

/// Lets every request through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl StreamAccess for AllowAll {
    fn can_stream(&self, _object_id: &ObjectId, _headers: &HeaderMap) -> bool {
        true
    }
}

impl<F> StreamAccess for F
where
    F: Fn(&ObjectId, &HeaderMap) -> bool + Send + Sync,
{
    fn can_stream(&self, object_id: &ObjectId, headers: &HeaderMap) -> bool {
        self(object_id, headers)
    }
}
