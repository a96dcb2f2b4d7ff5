// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
    pub assets: AssetsConfig,
    pub identity: IdentityConfig,
    pub flags: FlagsConfig,
    /// Development mode: skips the 404 page fallback and exposes error details
    #[serde(default)]
    pub debug: bool,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Connection handling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound for a single connection, in seconds
    pub connection_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Log file path (optional, stderr if not set)
    #[serde(default)]
    pub log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Asset store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory backing the asset store
    pub root: String,
    /// Asset key served with status 404 when a lookup misses
    pub not_found_page: String,
}

/// Request metadata injected by the edge in front of this server
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub email_header: String,
    pub country_header: String,
}

/// Flag object storage configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FlagsConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}
