//! `GET /stream/:object_id`

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method};
use reelstream_common::{Error, ObjectId};

use super::error::AppError;
use super::AppContext;
use crate::streaming::StreamResponse;

/// Serve an object, honoring an optional `Range` header. `HEAD` gets the
/// same framing without touching storage contents.
pub async fn stream_object(
    State(ctx): State<AppContext>,
    Path(object_id): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Result<StreamResponse, AppError> {
    let object_id: ObjectId = object_id.parse()?;

    if !ctx.access.can_stream(&object_id, &headers) {
        tracing::info!(object = %object_id, "Stream access denied");
        return Err(Error::Forbidden(format!("streaming {object_id} is not allowed")).into());
    }

    let range = headers
        .get(header::RANGE)
        .map(|v| {
            v.to_str()
                .map_err(|_| Error::malformed_range(String::from_utf8_lossy(v.as_bytes())))
        })
        .transpose()?;

    let response = if method == Method::HEAD {
        ctx.streamer.head(&object_id, range).await?
    } else {
        ctx.streamer.serve(&object_id, range).await?
    };
    Ok(response)
}
