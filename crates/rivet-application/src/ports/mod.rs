//! Application ports
//!
//! Contracts consumed by container assembly: configuration [`Module`]s,
//! transport [`Connector`]s, and the compile-time remote provider
//! [`registry`].

pub mod connector;
pub mod module;
pub mod registry;

pub use connector::Connector;
pub use module::Module;
