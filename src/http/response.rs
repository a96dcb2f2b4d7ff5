//! HTTP response building module
//!
//! Provides builders for the responses the dispatcher produces, decoupled from
//! routing decisions.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::headers;

pub const NOT_FOUND_BODY: &str = "404 Not Found";
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";
pub const FLAG_NOT_FOUND_BODY: &str = "Flag not found";
pub const FLAG_FETCH_ERROR_BODY: &str = "Error fetching flag";

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 500 response; `detail` replaces the generic body when present
pub fn build_500_response(detail: Option<&str>) -> Response<Full<Bytes>> {
    build_text_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        detail.unwrap_or(INTERNAL_ERROR_BODY),
    )
}

/// Build a plain text response
pub fn build_text_response(status: StatusCode, text: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(text.to_owned())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(text.to_owned())))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build PNG image response
pub fn build_png_response(data: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "image/png")
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("PNG", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build asset response with the security header set
///
/// For HEAD requests the body is dropped but `Content-Length` still reports
/// the asset size.
pub fn build_asset_response(
    status: StatusCode,
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut response = Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        });

    headers::apply_security_headers(response.headers_mut());
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_500_hides_detail_by_default() {
        let response = build_500_response(None);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await, INTERNAL_ERROR_BODY);

        let response = build_500_response(Some("disk on fire"));
        assert_eq!(body_of(response).await, "disk on fire");
    }

    #[tokio::test]
    async fn test_head_asset_keeps_length() {
        let response = build_asset_response(
            StatusCode::OK,
            Bytes::from_static(b"<h1>hi</h1>"),
            "text/html; charset=utf-8",
            true,
        );
        assert_eq!(response.headers().get("Content-Length").unwrap(), "11");
        assert_eq!(response.headers().get("X-Content-Type-Options").unwrap(), "nosniff");
        assert!(body_of(response).await.is_empty());
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let response = build_405_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get("Allow").unwrap(), "GET, HEAD");
    }
}
