//! Asset store module
//!
//! The key-value store static site assets are served from. A request path is
//! turned into an asset key by a mapping function, then looked up.

mod dir;
mod memory;

pub use dir::DirAssetStore;
pub use memory::MemoryAssetStore;

use std::future::Future;

use hyper::body::Bytes;
use percent_encoding::percent_decode_str;

use crate::http::mime;
use crate::lookup::Lookup;

/// A stored asset and its inferred content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub body: Bytes,
    pub content_type: &'static str,
}

impl Asset {
    /// Build an asset, inferring the content type from the key's extension
    pub fn from_key(key: &str, body: Bytes) -> Self {
        Self {
            body,
            content_type: mime::content_type_for_key(key),
        }
    }
}

/// Key-value backend holding the site's assets
pub trait AssetStore: Send + Sync + 'static {
    /// Look up an asset by key (an absolute path such as `/index.html`)
    fn get(&self, key: &str) -> impl Future<Output = Lookup<Asset>> + Send;
}

/// Default request-to-asset-key mapping
///
/// - `/` and `/docs/` map to `/index.html` and `/docs/index.html`
/// - `/about` (no extension) maps to `/about/index.html`
/// - anything else is used as is
pub fn map_request_to_asset(path: &str) -> String {
    if path.is_empty() {
        return "/index.html".to_string();
    }
    if path.ends_with('/') {
        return format!("{path}index.html");
    }

    let last_segment = path.rsplit('/').next().unwrap_or(path);
    if last_segment.contains('.') {
        path.to_string()
    } else {
        format!("{path}/index.html")
    }
}

/// Percent-decode `path` once
///
/// Returns `None` when decoding changes nothing or the result is not UTF-8.
pub fn decode_path(path: &str) -> Option<String> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    (decoded != path).then(|| decoded.into_owned())
}

/// Map `path` to a key with `mapper` and look it up in `store`
pub async fn get_asset<S, M>(store: &S, path: &str, mapper: M) -> Lookup<Asset>
where
    S: AssetStore,
    M: Fn(&str) -> String,
{
    let key = mapper(path);
    store.get(&key).await
}
