//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns supporting the application and domain
//! layers.
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (defaults, TOML, `RIVET_*` env) |
//! | [`di`] | Container bootstrap wiring config, providers and connectors |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension for foreign errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, Bootstrap, init_app};
pub use error_ext::ErrorContext;
