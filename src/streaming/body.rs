//! Chunked body stream for one serving window.
//!
//! The stream is pull-based: hyper polls it only when the connection can
//! take more data, and each poll reads at most one chunk from storage. When
//! the client goes away the stream is dropped, which drops the storage
//! reader with it.

use std::io;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reelstream_common::ObjectId;
use reelstream_storage::ObjectReader;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    InFlight,
    Complete,
    Failed,
}

/// Progress of one transfer; reports how it ended when dropped.
struct Transfer {
    object_id: ObjectId,
    expected: u64,
    sent: u64,
    outcome: Outcome,
}

impl Transfer {
    fn new(object_id: ObjectId, expected: u64) -> Self {
        Self {
            object_id,
            expected,
            sent: 0,
            outcome: Outcome::InFlight,
        }
    }

    fn fail(&mut self, err: &io::Error) {
        self.outcome = Outcome::Failed;
        tracing::warn!(
            object = %self.object_id,
            sent = self.sent,
            expected = self.expected,
            "Storage read failed mid-stream: {err}"
        );
    }
}

impl Drop for Transfer {
    fn drop(&mut self) {
        match self.outcome {
            Outcome::Complete => {
                tracing::trace!(object = %self.object_id, bytes = self.sent, "Stream complete");
            }
            Outcome::InFlight => {
                tracing::debug!(
                    object = %self.object_id,
                    sent = self.sent,
                    expected = self.expected,
                    "Client disconnected before stream completed"
                );
            }
            Outcome::Failed => {}
        }
    }
}

/// Stream exactly `length` bytes from `reader` in chunks of `chunk_size`.
///
/// A reader that runs dry early yields an `UnexpectedEof` error so the
/// connection is aborted instead of ending on a short, well-formed body.
pub fn window_stream(
    reader: ObjectReader,
    object_id: ObjectId,
    length: u64,
    chunk_size: usize,
) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static {
    async_stream::stream! {
        let mut transfer = Transfer::new(object_id, length);
        let mut chunks = ReaderStream::with_capacity(reader.take(length), chunk_size);

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    transfer.sent += bytes.len() as u64;
                    // hyper stops polling once Content-Length bytes are out,
                    // so the end of the reader may never be observed.
                    if transfer.sent == length {
                        transfer.outcome = Outcome::Complete;
                    }
                    yield Ok(bytes);
                }
                Err(e) => {
                    transfer.fail(&e);
                    yield Err(e);
                    return;
                }
            }
        }

        if transfer.sent < length {
            let e = io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("object ended after {} of {} bytes", transfer.sent, length),
            );
            transfer.fail(&e);
            yield Err(e);
        }
    }
}
