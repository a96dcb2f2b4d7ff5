//! Startup and infrastructure errors.
//!
//! Request handling never produces an [`Error`]: lookup failures are turned
//! into HTTP responses by the dispatcher. This type covers what can stop the
//! server from starting or serving.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build flag client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("logger already initialized")]
    LoggerInitialized,
}
