//! Edge request router.
//!
//! Serves a static site out of a key-value asset store, plus two dynamic
//! routes under `/secure`: an identity page for the caller the edge
//! authenticated, and a proxy for per-country flag images.
//!
//! [`handler::Dispatcher`] holds the routing; [`server`] hosts it on a
//! tokio + hyper HTTP/1.1 listener.

pub mod config;
pub mod error;
pub mod flags;
pub mod handler;
pub mod http;
pub mod logger;
pub mod lookup;
pub mod server;
pub mod state;
pub mod store;

pub use error::Error;
pub use handler::{DispatchSettings, Dispatcher};
pub use lookup::Lookup;
pub use state::AppState;
