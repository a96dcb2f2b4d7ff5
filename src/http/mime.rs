//! MIME type detection module
//!
//! Returns the corresponding Content-Type for an asset key.

use std::path::Path;

/// Get MIME Content-Type for an asset key based on its file extension
///
/// # Examples
/// ```
/// use edge_router::http::mime::content_type_for_key;
/// assert_eq!(content_type_for_key("/index.html"), "text/html; charset=utf-8");
/// assert_eq!(content_type_for_key("/img/logo.svg"), "image/svg+xml");
/// assert_eq!(content_type_for_key("/LICENSE"), "application/octet-stream");
/// ```
pub fn content_type_for_key(key: &str) -> &'static str {
    let extension = Path::new(key)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(extension.as_deref())
}

/// Get MIME Content-Type based on file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("csv") => "text/csv",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_asset_types() {
        assert_eq!(content_type_for_key("/index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for_key("/css/site.css"), "text/css; charset=utf-8");
        assert_eq!(content_type_for_key("/app.js"), "application/javascript");
        assert_eq!(content_type_for_key("/flags/de.png"), "image/png");
        assert_eq!(content_type_for_key("/fonts/inter.woff2"), "font/woff2");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(content_type_for_key("/PHOTO.JPG"), "image/jpeg");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type_for_key("/archive.xyz"), "application/octet-stream");
        assert_eq!(content_type_for_key("/README"), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }
}
