//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: classifies the path and hands the
//! request to the identity page, the flag proxy, or the asset store.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};

use crate::config::Config;
use crate::flags::FlagSource;
use crate::handler::{flag_proxy, identity, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::state::AppState;
use crate::store::AssetStore;

const SECURE_PATH: &str = "/secure";
const SECURE_PREFIX: &str = "/secure/";

/// Which behavior a request path selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/secure` or `/secure/`
    Identity,
    /// `/secure/<country>`
    Flag(&'a str),
    /// Everything else
    Asset,
}

/// Classify a request path, first match wins
pub fn classify(path: &str) -> Route<'_> {
    if path == SECURE_PATH || path == SECURE_PREFIX {
        return Route::Identity;
    }
    match path.strip_prefix(SECURE_PREFIX) {
        Some(country) => Route::Flag(country),
        None => Route::Asset,
    }
}

/// Per-deployment settings the behaviors read
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub not_found_page: String,
    pub email_header: String,
    pub country_header: String,
    pub flag_base_url: String,
    pub debug: bool,
}

impl DispatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            not_found_page: config.assets.not_found_page.clone(),
            email_header: config.identity.email_header.clone(),
            country_header: config.identity.country_header.clone(),
            flag_base_url: config.flags.base_url.clone(),
            debug: config.debug,
        }
    }
}

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub is_head: bool,
}

impl RequestContext<'_> {
    pub fn is_get_or_head(&self) -> bool {
        matches!(*self.method, Method::GET | Method::HEAD)
    }
}

/// Routes every request to one of the three behaviors
///
/// Holds no per-request state; one instance is shared by all connections.
pub struct Dispatcher<S, F> {
    store: S,
    flags: F,
    settings: DispatchSettings,
}

impl<S: AssetStore, F: FlagSource> Dispatcher<S, F> {
    pub const fn new(store: S, flags: F, settings: DispatchSettings) -> Self {
        Self {
            store,
            flags,
            settings,
        }
    }

    pub const fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Produce the response for `req`; never fails
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>> {
        let (parts, _) = req.into_parts();
        self.handle_parts(&parts).await
    }

    async fn handle_parts(&self, parts: &Parts) -> Response<Full<Bytes>> {
        let ctx = RequestContext {
            method: &parts.method,
            path: parts.uri.path(),
            is_head: parts.method == Method::HEAD,
        };

        match classify(ctx.path) {
            Route::Identity => self.serve_identity(parts),
            Route::Flag(country) => flag_proxy::serve_flag(&self.flags, country).await,
            Route::Asset => static_files::serve_asset(&self.store, &ctx, &self.settings).await,
        }
    }

    fn serve_identity(&self, parts: &Parts) -> Response<Full<Bytes>> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
        };

        let html = identity::render_identity_page(
            header(self.settings.email_header.as_str()),
            header(self.settings.country_header.as_str()),
            &self.settings.flag_base_url,
            Utc::now(),
        );
        http::build_html_response(html)
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<S, F, B>(
    req: Request<B>,
    state: Arc<AppState<S, F>>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    S: AssetStore,
    F: FlagSource,
{
    let started = Instant::now();
    let entry = state
        .config
        .logging
        .access_log
        .then(|| access_entry(&req, peer));

    let response = state.dispatcher.handle(req).await;

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn access_entry<B>(req: &Request<B>, peer: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}
