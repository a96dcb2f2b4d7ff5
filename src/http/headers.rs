//! Fixed header names and the security header set attached to static assets.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

pub const X_XSS_PROTECTION: &str = "x-xss-protection";
pub const X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
pub const X_FRAME_OPTIONS: &str = "x-frame-options";
pub const REFERRER_POLICY: &str = "referrer-policy";
pub const FEATURE_POLICY: &str = "feature-policy";

/// Headers set on every asset served from the store
pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    (X_XSS_PROTECTION, "1; mode=block"),
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (REFERRER_POLICY, "unsafe-url"),
    (FEATURE_POLICY, "none"),
];

/// Insert the security headers, replacing any existing values
pub fn apply_security_headers(headers: &mut HeaderMap) {
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_existing() {
        let mut headers = HeaderMap::new();
        headers.insert("x-frame-options", HeaderValue::from_static("SAMEORIGIN"));
        headers.insert("content-type", HeaderValue::from_static("text/css"));

        apply_security_headers(&mut headers);

        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(headers.get("Content-Type").unwrap(), "text/css");
        assert_eq!(headers.len(), 6);
    }
}
