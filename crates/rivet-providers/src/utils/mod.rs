//! Shared utilities for provider implementations

#[cfg(feature = "remote-http")]
pub mod http_response;

#[cfg(feature = "remote-http")]
pub use http_response::HttpResponseUtils;
