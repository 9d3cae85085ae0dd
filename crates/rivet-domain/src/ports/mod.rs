//! Port contracts
//!
//! Traits implemented by transport providers and consumed by the
//! container. Class-level ports that depend on assembly types (modules,
//! connectors) live in the application layer.

pub mod remote;
pub mod sse;

pub use remote::{
    PropertyProvider, RemoteCall, RemoteFactory, RemoteFactoryProvider, RemoteInterface,
    RemoteProxy, RemoteTransport,
};
pub use sse::EventSink;
