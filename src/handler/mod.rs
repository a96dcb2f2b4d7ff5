//! Request handler module
//!
//! Responsible for request routing dispatch and the three behaviors behind it:
//! the identity page, the flag proxy, and static assets.

pub mod flag_proxy;
pub mod identity;
pub mod router;
pub mod static_files;

// Re-export main entry points
pub use router::{classify, handle_request, DispatchSettings, Dispatcher, Route};
