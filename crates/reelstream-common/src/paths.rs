//! Content-type detection by file extension.
//!
//! Storage backends that only know a file name use these helpers to fill in
//! the `Content-Type` of a stored object.

use std::path::Path;

/// Fallback for extensions we do not recognize.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Map a bare extension (no dot, any case) to a MIME type.
///
/// # Examples
///
/// ```
/// use reelstream_common::paths::content_type_for_extension;
///
/// assert_eq!(content_type_for_extension("MP4"), "video/mp4");
/// assert_eq!(content_type_for_extension("xyz"), "application/octet-stream");
/// ```
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "ts" | "m2ts" => "video/mp2t",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "ogv" => "video/ogg",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Guess the MIME type of a path from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(content_type_for_extension)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
