// Configuration module entry point
// Loads settings from an optional file, the environment, and built-in defaults

mod types;

use std::net::SocketAddr;

use crate::error::Error;

pub use types::{
    AssetsConfig, Config, FlagsConfig, IdentityConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Default configuration file (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Public bucket serving `<country>.png` flag images
pub const DEFAULT_FLAG_BASE_URL: &str = "https://pub-a0f085f9f9a74647b5b726dd329ccbdd.r2.dev";

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, Error> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error; defaults and `EDGE__*` variables apply
    pub fn load_from(config_path: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("EDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("assets.root", "public")?
            .set_default("assets.not_found_page", "/404.html")?
            .set_default("identity.email_header", "cf-access-authenticated-user-email")?
            .set_default("identity.country_header", "cf-ipcountry")?
            .set_default("flags.base_url", DEFAULT_FLAG_BASE_URL)?
            .set_default("flags.timeout_secs", 10)?
            .set_default("debug", false)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| Error::InvalidAddress(addr))
    }
}
