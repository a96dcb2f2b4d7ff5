//! Flag proxy: passes a country's flag image through from the bucket.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::flags::{self, FlagSource};
use crate::http::{self, response};
use crate::logger;
use crate::lookup::Lookup;

/// Serve the flag for `country`
///
/// Malformed codes are answered like a missing flag, without contacting the
/// bucket.
pub async fn serve_flag<F: FlagSource>(source: &F, country: &str) -> Response<Full<Bytes>> {
    if !flags::is_valid_country(country) {
        logger::log_warning(&format!("Rejected flag request for country {country:?}"));
        return flag_not_found();
    }

    match source.fetch(country).await {
        Lookup::Found(image) => http::build_png_response(image),
        Lookup::NotFound => flag_not_found(),
        Lookup::UpstreamError(detail) => {
            logger::log_error(&format!("Flag fetch failed: {detail}"));
            http::build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                response::FLAG_FETCH_ERROR_BODY,
            )
        }
    }
}

fn flag_not_found() -> Response<Full<Bytes>> {
    http::build_text_response(StatusCode::NOT_FOUND, response::FLAG_NOT_FOUND_BODY)
}
