//! `Range` header parsing and serving-window resolution.
//!
//! Only single byte ranges are understood:
//!
//! - `bytes=500-999`: bytes 500 through 999 inclusive
//! - `bytes=500-`: byte 500 through the end of the object
//! - `bytes=-500`: the last 500 bytes (suffix form)
//!
//! The end offset is never clamped: a range reaching past the last byte is
//! unsatisfiable rather than silently shortened.

use reelstream_common::{Error, Result};

/// A byte range as written by the client, before it meets an object size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=start-end` or `bytes=start-`.
    Bounded { start: u64, end: Option<u64> },
    /// `bytes=-length`.
    Suffix { length: u64 },
}

/// A parsed `Range` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRequest {
    range: ByteRange,
    raw: String,
}

impl RangeRequest {
    /// Parse a `Range` header value.
    ///
    /// Fails with [`Error::MalformedRange`] for anything other than a single
    /// `bytes` range with decimal offsets.
    pub fn parse(header: &str) -> Result<Self> {
        let malformed = || Error::malformed_range(header);

        let (unit, spec) = header.trim().split_once('=').ok_or_else(malformed)?;
        if !unit.trim().eq_ignore_ascii_case("bytes") {
            return Err(malformed());
        }
        // multipart/byteranges is not produced
        if spec.contains(',') {
            return Err(malformed());
        }

        let (start, end) = spec.split_once('-').ok_or_else(malformed)?;
        let (start, end) = (start.trim(), end.trim());

        let range = match (start.is_empty(), end.is_empty()) {
            (true, true) => return Err(malformed()),
            (true, false) => ByteRange::Suffix {
                length: parse_offset(end).ok_or_else(malformed)?,
            },
            (false, true) => ByteRange::Bounded {
                start: parse_offset(start).ok_or_else(malformed)?,
                end: None,
            },
            (false, false) => ByteRange::Bounded {
                start: parse_offset(start).ok_or_else(malformed)?,
                end: Some(parse_offset(end).ok_or_else(malformed)?),
            },
        };

        Ok(Self {
            range,
            raw: header.to_string(),
        })
    }

    pub fn range(&self) -> ByteRange {
        self.range
    }

    pub fn is_suffix(&self) -> bool {
        matches!(self.range, ByteRange::Suffix { .. })
    }

    /// Resolve against an object of `total_size` bytes.
    ///
    /// Fails with [`Error::UnsatisfiableRange`] unless
    /// `0 <= start <= end <= total_size - 1`.
    pub fn resolve(&self, total_size: u64) -> Result<ServingWindow> {
        let (start, end) = match self.range {
            ByteRange::Bounded { start, end } => {
                let last = total_size.checked_sub(1);
                match (end.or(last), last) {
                    (Some(end), Some(_)) => (start, end),
                    _ => return Err(self.unsatisfiable(total_size)),
                }
            }
            ByteRange::Suffix { length: 0 } => return Err(self.unsatisfiable(total_size)),
            // A suffix longer than the object selects all of it.
            ByteRange::Suffix { length } => {
                (total_size.saturating_sub(length), total_size.saturating_sub(1))
            }
        };

        ServingWindow::new(start, end, total_size).ok_or_else(|| self.unsatisfiable(total_size))
    }

    fn unsatisfiable(&self, total_size: u64) -> Error {
        Error::unsatisfiable(&self.raw, total_size)
    }
}

/// Strict decimal: `u64::from_str` alone would also take a leading `+`.
fn parse_offset(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Inclusive byte window `[start, end]` inside an object.
///
/// Always satisfies `start <= end < total_size`, so it is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServingWindow {
    start: u64,
    end: u64,
    total_size: u64,
}

impl ServingWindow {
    fn new(start: u64, end: u64, total_size: u64) -> Option<Self> {
        (start <= end && end < total_size).then_some(Self {
            start,
            end,
            total_size,
        })
    }

    /// The whole object, or `None` for an empty one.
    pub fn whole(total_size: u64) -> Option<Self> {
        Self::new(0, total_size.checked_sub(1)?, total_size)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of bytes in the window (`end - start + 1`).
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value: `bytes {start}-{end}/{total}`.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total_size)
    }
}
