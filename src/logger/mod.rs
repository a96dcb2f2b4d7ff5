//! Logger module
//!
//! Provides logging utilities for the router including:
//! - Subscriber setup (level filter, stderr or file output)
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use std::fs::{File, OpenOptions};
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Mutex;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Error;

/// Target used for access log lines, so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber with configuration
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level`.
pub fn init(config: &Config) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.logging.log_file.as_deref() {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };

    result.map_err(|_| Error::LoggerInitialized)
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info!(%addr, "edge router listening");
    info!(
        root = %config.assets.root,
        not_found_page = %config.assets.not_found_page,
        "serving assets"
    );
    info!(base_url = %config.flags.base_url, "flag proxy upstream");
    if let Some(workers) = config.server.workers {
        info!(workers, "worker threads");
    }
    if let Some(ref path) = config.logging.log_file {
        info!(path = %path, "logging to file");
    }
    if config.debug {
        warn!("debug mode: 404 fallback disabled, error details exposed");
    }
}

pub fn log_shutdown(in_flight: usize) {
    info!(in_flight, "shutdown signal received, draining connections");
}

pub fn log_stopped() {
    info!("edge router stopped");
}

pub fn log_connection_error(peer: &SocketAddr, err: &impl std::fmt::Display) {
    error!(%peer, "failed to serve connection: {err}");
}

pub fn log_error(message: &str) {
    error!("{message}");
}

pub fn log_warning(message: &str) {
    warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/router.log");
        let file = open_log_file(path.to_str().unwrap());
        assert!(file.is_ok());
        assert!(path.exists());
    }
}
