//! Status line and headers for a streamed object.

use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use reelstream_common::paths::DEFAULT_CONTENT_TYPE;
use reelstream_storage::ObjectMeta;

use super::range::ServingWindow;

/// Everything a client needs to interpret the body that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFraming {
    pub status: StatusCode,
    pub content_type: String,
    pub content_length: u64,
    /// Set only on 206 responses.
    pub content_range: Option<String>,
    pub cache_control: Option<String>,
}

impl ResponseFraming {
    /// 200 response carrying the whole object.
    pub fn full(meta: &ObjectMeta) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: meta.content_type.clone(),
            content_length: meta.size,
            content_range: None,
            cache_control: None,
        }
    }

    /// 206 response carrying `window`.
    pub fn partial(window: &ServingWindow, meta: &ObjectMeta) -> Self {
        Self {
            status: StatusCode::PARTIAL_CONTENT,
            content_type: meta.content_type.clone(),
            content_length: window.length(),
            content_range: Some(window.content_range()),
            cache_control: None,
        }
    }

    pub fn with_cache_control(mut self, value: Option<&str>) -> Self {
        self.cache_control = value.map(str::to_owned);
        self
    }

    /// Render the framing as response headers.
    ///
    /// `Accept-Ranges: bytes` is sent on both 200 and 206 so players learn
    /// they can seek from the first response.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let content_type = HeaderValue::from_str(&self.content_type).unwrap_or_else(|_| {
            tracing::warn!("Invalid content type {:?}; sending default", self.content_type);
            HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
        });
        headers.insert(header::CONTENT_TYPE, content_type);
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(self.content_length));
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));

        if let Some(ref range) = self.content_range {
            if let Ok(value) = HeaderValue::from_str(range) {
                headers.insert(header::CONTENT_RANGE, value);
            }
        }

        if let Some(ref cache_control) = self.cache_control {
            match HeaderValue::from_str(cache_control) {
                Ok(value) => {
                    headers.insert(header::CACHE_CONTROL, value);
                }
                Err(_) => tracing::warn!("Ignoring invalid cache-control {cache_control:?}"),
            }
        }

        headers
    }
}
