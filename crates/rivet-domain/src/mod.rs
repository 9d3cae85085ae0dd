//! # Rivet Domain Layer
//!
//! Core types and port contracts shared by every layer of the container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error taxonomy and `Result` alias |
//! | [`constants`] | Annotation markers and protocol defaults |
//! | [`value_objects`] | Binding keys, scopes, capabilities, URLs, outbound events |
//! | [`ports`] | Remote invocation and event sink contracts |
//!
//! The domain layer holds no runtime state: registries, injectors and
//! transports live in the application and provider crates.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
