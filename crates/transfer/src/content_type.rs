//! Content-type and content-encoding inference for uploaded objects.

use std::path::Path;

/// Detects a MIME type from a file's extension.
///
/// Returns `None` when the extension is unknown; callers fall back to the
/// request's default MIME type.
pub fn detect_content_type(path: &str) -> Option<&'static str> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("html" | "htm") => Some("text/html"),
        Some("js" | "mjs") => Some("application/javascript"),
        Some("css") => Some("text/css"),
        Some("json" | "map") => Some("application/json"),
        Some("xml") => Some("application/xml"),
        Some("txt") => Some("text/plain"),
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("webp") => Some("image/webp"),
        Some("gif") => Some("image/gif"),
        Some("ico") => Some("image/x-icon"),
        Some("svg") => Some("image/svg+xml"),
        Some("swf") => Some("application/x-shockwave-flash"),
        Some("eot") => Some("application/vnd.ms-fontobject"),
        Some("ttf") => Some("font/ttf"),
        Some("otf") => Some("font/otf"),
        Some("woff") => Some("font/woff"),
        Some("woff2") => Some("font/woff2"),
        Some("wasm") => Some("application/wasm"),
        _ => None,
    }
}

/// Content-Encoding for a path, given the variant lists it may appear in.
///
/// Precompressed variants keep their original file names, so the encoding
/// cannot be read off the extension.
pub fn content_encoding(path: &str, gzipped: &[String], brotli: &[String]) -> Option<&'static str> {
    if brotli.iter().any(|p| p == path) {
        Some("br")
    } else if gzipped.iter().any(|p| p == path) {
        Some("gzip")
    } else {
        None
    }
}
