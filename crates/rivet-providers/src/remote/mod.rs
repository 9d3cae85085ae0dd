//! Remote factory providers
//!
//! | Provider | Protocols | Feature |
//! |----------|-----------|---------|
//! | [`HttpRemoteFactoryProvider`] | `http`, `https` | `remote-http` |
//!
//! Providers register themselves in the application layer's
//! `REMOTE_FACTORY_PROVIDERS` slice and are picked up at container
//! assembly.

#[cfg(feature = "remote-http")]
pub mod http;
pub mod properties;

#[cfg(feature = "remote-http")]
pub use http::{HttpRemoteFactory, HttpRemoteFactoryProvider, HttpRemoteTransport};
pub use properties::StaticPropertyProvider;
