//! Static asset serving module
//!
//! Looks request paths up in the asset store, falling back to the site's
//! 404 page on a miss.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::handler::router::{DispatchSettings, RequestContext};
use crate::http;
use crate::logger;
use crate::lookup::Lookup;
use crate::store::{self, Asset, AssetStore};

/// Serve the asset for the request path
pub async fn serve_asset<S: AssetStore>(
    store: &S,
    ctx: &RequestContext<'_>,
    settings: &DispatchSettings,
) -> Response<Full<Bytes>> {
    if !ctx.is_get_or_head() {
        logger::log_warning(&format!("Method not allowed: {}", ctx.method));
        return http::build_405_response();
    }

    match lookup_asset(store, ctx.path).await {
        Lookup::Found(asset) => {
            http::build_asset_response(StatusCode::OK, asset.body, asset.content_type, ctx.is_head)
        }
        Lookup::NotFound if settings.debug => {
            let key = store::map_request_to_asset(ctx.path);
            http::build_500_response(Some(&format!("could not find {key} in the asset store")))
        }
        Lookup::NotFound => serve_not_found_page(store, ctx, settings).await,
        Lookup::UpstreamError(detail) => internal_error(&detail, settings.debug),
    }
}

/// Look the raw path up, then its percent-decoded form on a miss
async fn lookup_asset<S: AssetStore>(store: &S, path: &str) -> Lookup<Asset> {
    let lookup = store::get_asset(store, path, store::map_request_to_asset).await;
    if !matches!(lookup, Lookup::NotFound) {
        return lookup;
    }
    match store::decode_path(path) {
        Some(decoded) => store::get_asset(store, &decoded, store::map_request_to_asset).await,
        None => lookup,
    }
}

/// Serve the configured 404 page with status 404
///
/// If the page itself is missing, a plain 404 is returned.
async fn serve_not_found_page<S: AssetStore>(
    store: &S,
    ctx: &RequestContext<'_>,
    settings: &DispatchSettings,
) -> Response<Full<Bytes>> {
    let page = settings.not_found_page.as_str();
    match store::get_asset(store, ctx.path, |_: &str| page.to_string()).await {
        Lookup::Found(asset) => http::build_asset_response(
            StatusCode::NOT_FOUND,
            asset.body,
            asset.content_type,
            ctx.is_head,
        ),
        Lookup::NotFound => http::build_404_response(),
        Lookup::UpstreamError(detail) => internal_error(&detail, settings.debug),
    }
}

fn internal_error(detail: &str, debug: bool) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Asset store error: {detail}"));
    http::build_500_response(debug.then_some(detail))
}
