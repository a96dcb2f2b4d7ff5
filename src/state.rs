// Application state module
// Shared, immutable state handed to every connection

use crate::config::Config;
use crate::error::Error;
use crate::flags::{FlagSource, HttpFlagSource};
use crate::handler::{DispatchSettings, Dispatcher};
use crate::store::{AssetStore, DirAssetStore};

/// Application state
pub struct AppState<S, F> {
    pub config: Config,
    pub dispatcher: Dispatcher<S, F>,
}

impl<S: AssetStore, F: FlagSource> AppState<S, F> {
    pub const fn new(config: Config, dispatcher: Dispatcher<S, F>) -> Self {
        Self { config, dispatcher }
    }
}

impl AppState<DirAssetStore, HttpFlagSource> {
    /// Build the production state: directory store and HTTP flag client
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let store = DirAssetStore::new(&config.assets.root);
        let flags = HttpFlagSource::new(&config.flags)?;
        let dispatcher = Dispatcher::new(store, flags, DispatchSettings::from_config(&config));
        Ok(Self::new(config, dispatcher))
    }
}
