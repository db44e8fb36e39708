//! Host APIs for thumbbot fetch strategies.
//!
//! - [`http`] - HTTP client with tracing and redirect control

pub mod http;

// Re-export key types
pub use http::{HttpClient, ResponseExt, header_map};
