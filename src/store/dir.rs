//! Directory-backed asset store.
//!
//! Asset keys are resolved under a root directory. Keys that would escape the
//! root are treated as misses.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use hyper::body::Bytes;
use tokio::fs;
use tokio::sync::OnceCell;

use super::{Asset, AssetStore};
use crate::logger;
use crate::lookup::Lookup;

#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
    /// Canonical root, resolved on first successful lookup
    canonical_root: OnceCell<PathBuf>,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            canonical_root: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `key` onto the root, rejecting anything but plain path segments
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return None;
        }
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        plain.then(|| self.root.join(relative))
    }
}

impl AssetStore for DirAssetStore {
    async fn get(&self, key: &str) -> Lookup<Asset> {
        let Some(path) = self.resolve(key) else {
            logger::log_warning(&format!("Rejected asset key: {key}"));
            return Lookup::NotFound;
        };

        let root = match self
            .canonical_root
            .get_or_try_init(|| fs::canonicalize(&self.root))
            .await
        {
            Ok(p) => p,
            Err(e) => {
                return Lookup::UpstreamError(format!(
                    "asset root '{}' is not accessible: {e}",
                    self.root.display()
                ));
            }
        };

        // File not found is common (404), no need to log
        let canonical = match fs::canonicalize(&path).await {
            Ok(p) => p,
            Err(e) if e.kind() == ErrorKind::NotFound => return Lookup::NotFound,
            Err(e) => return Lookup::UpstreamError(format!("failed to resolve '{key}': {e}")),
        };
        if !canonical.starts_with(root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {key} -> {}",
                canonical.display()
            ));
            return Lookup::NotFound;
        }

        match fs::metadata(&canonical).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Lookup::NotFound,
            Err(e) => return Lookup::UpstreamError(format!("failed to stat '{key}': {e}")),
        }

        match fs::read(&canonical).await {
            Ok(content) => Lookup::Found(Asset::from_key(key, Bytes::from(content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Lookup::NotFound,
            Err(e) => Lookup::UpstreamError(format!("failed to read '{key}': {e}")),
        }
    }
}
