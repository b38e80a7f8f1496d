//! [`RangeStreamer`]: turns an object id plus an optional `Range` header
//! into a framed, streaming response.

use std::sync::Arc;

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use reelstream_common::{Error, ObjectId, Result};
use reelstream_storage::ObjectStore;

use super::body::window_stream;
use super::framing::ResponseFraming;
use super::range::{RangeRequest, ServingWindow};
use crate::config::StreamingConfig;

/// How a request will be answered once its range is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    /// No `Range` header: 200 with the whole object.
    Full,
    /// Satisfiable `Range` header: 206 with this window.
    Partial(ServingWindow),
}

/// Framing plus a body that has not been read yet.
pub struct StreamResponse {
    framing: ResponseFraming,
    body: Body,
}

impl StreamResponse {
    pub fn into_parts(self) -> (ResponseFraming, Body) {
        (self.framing, self.body)
    }
}

impl IntoResponse for StreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(self.body);
        *response.status_mut() = self.framing.status;
        *response.headers_mut() = self.framing.headers();
        response
    }
}

/// Serves byte windows of stored objects.
///
/// Holds no per-request state, so one instance is shared by every request.
pub struct RangeStreamer {
    store: Arc<dyn ObjectStore>,
    config: StreamingConfig,
}

impl RangeStreamer {
    pub fn new(store: Arc<dyn ObjectStore>, config: StreamingConfig) -> Self {
        Self { store, config }
    }

    /// Decide between a full and a partial response for an object of
    /// `total_size` bytes.
    pub fn resolve_mode(&self, range_header: Option<&str>, total_size: u64) -> Result<ServeMode> {
        let Some(header) = range_header else {
            return Ok(ServeMode::Full);
        };

        let request = RangeRequest::parse(header)?;
        if request.is_suffix() && !self.config.suffix_ranges {
            return Err(Error::malformed_range(header));
        }

        request.resolve(total_size).map(ServeMode::Partial)
    }

    /// Serve `object_id`, honoring `range_header` when present.
    ///
    /// Lookup failures and bad ranges are returned before storage is opened
    /// for reading; once this returns `Ok` the only remaining failure mode is
    /// a read error while the body streams.
    pub async fn serve(
        &self,
        object_id: &ObjectId,
        range_header: Option<&str>,
    ) -> Result<StreamResponse> {
        let (framing, window) = self.frame(object_id, range_header).await?;

        let body = match window {
            Some(window) => self.open_body(object_id, window).await?,
            None => Body::empty(),
        };

        Ok(StreamResponse { framing, body })
    }

    /// Same framing and errors as [`serve`](Self::serve), but storage is
    /// never opened for reading. Answers `HEAD`.
    pub async fn head(
        &self,
        object_id: &ObjectId,
        range_header: Option<&str>,
    ) -> Result<StreamResponse> {
        let (framing, _) = self.frame(object_id, range_header).await?;
        Ok(StreamResponse {
            framing,
            body: Body::empty(),
        })
    }

    async fn frame(
        &self,
        object_id: &ObjectId,
        range_header: Option<&str>,
    ) -> Result<(ResponseFraming, Option<ServingWindow>)> {
        let meta = self.store.stat(object_id).await?;

        let mode = self.resolve_mode(range_header, meta.size).inspect_err(|e| {
            tracing::debug!(object = %object_id, size = meta.size, "Rejected range: {e}");
        })?;

        let (framing, window) = match mode {
            ServeMode::Full => (ResponseFraming::full(&meta), ServingWindow::whole(meta.size)),
            ServeMode::Partial(window) => {
                (ResponseFraming::partial(&window, &meta), Some(window))
            }
        };
        let framing = framing.with_cache_control(self.config.cache_control.as_deref());

        tracing::debug!(
            object = %object_id,
            backend = self.store.backend(),
            status = framing.status.as_u16(),
            range = framing.content_range.as_deref().unwrap_or("full"),
            "Serving object"
        );

        Ok((framing, window))
    }

    async fn open_body(&self, object_id: &ObjectId, window: ServingWindow) -> Result<Body> {
        let reader = self.store.open_at(object_id, window.start()).await?;
        let stream = window_stream(
            reader,
            object_id.clone(),
            window.length(),
            self.config.chunk_size,
        );
        Ok(Body::from_stream(stream))
    }
}
