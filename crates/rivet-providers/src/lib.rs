//! # Rivet - Provider Implementations
//!
//! Concrete implementations of the ports declared in `rivet-domain` and
//! `rivet-application`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Remote factories | `RemoteFactoryProvider` | HTTP (`http`, `https`) |
//! | Property providers | `PropertyProvider` | Static |
//! | Connectors | `Connector` | RMI, REST, remote client |
//! | Server-sent events | `EventSink` | Channel sink, broadcaster |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! rivet-providers = { version = "0.1", default-features = false }
//! ```
//!
//! Without `remote-http` no remote factory is registered and every remote
//! client fails with `UnsupportedProtocol`.

pub use rivet_domain::error::{Error, Result};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Remote factory providers and property providers
pub mod remote;

/// Transport connectors claiming managed classes
pub mod connectors;

/// Server-sent event sinks and broadcasting
pub mod sse;

pub use connectors::{RemoteClientConnector, RestConnector, RmiConnector};
pub use sse::{BroadcastReport, ChannelSink, EventStream, Sse, SseBroadcaster, SseOptions};
