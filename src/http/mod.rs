//! HTTP protocol layer module
//!
//! Response builders, content-type detection and fixed header sets, shared by
//! every dispatcher behavior.

pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_asset_response,
    build_html_response, build_png_response, build_text_response,
};
