//! In-process asset store, for embedding and tests.

use std::collections::HashMap;

use hyper::body::Bytes;

use super::{Asset, AssetStore};
use crate::lookup::Lookup;

#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    assets: HashMap<String, Bytes>,
    failures: HashMap<String, String>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_asset(mut self, key: &str, body: impl Into<Bytes>) -> Self {
        self.insert(key, body);
        self
    }

    /// Make lookups of `key` fail with `detail`, as a broken backend would
    #[must_use]
    pub fn with_failure(mut self, key: &str, detail: &str) -> Self {
        self.failures.insert(key.to_string(), detail.to_string());
        self
    }

    pub fn insert(&mut self, key: &str, body: impl Into<Bytes>) {
        self.assets.insert(key.to_string(), body.into());
    }
}

impl AssetStore for MemoryAssetStore {
    async fn get(&self, key: &str) -> Lookup<Asset> {
        if let Some(detail) = self.failures.get(key) {
            return Lookup::UpstreamError(detail.clone());
        }
        match self.assets.get(key) {
            Some(body) => Lookup::Found(Asset::from_key(key, body.clone())),
            None => Lookup::NotFound,
        }
    }
}
