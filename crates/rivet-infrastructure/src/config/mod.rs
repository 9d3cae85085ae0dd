//! Configuration
//!
//! Layered configuration, later sources overriding earlier ones:
//!
//! 1. Defaults (`AppConfig::default()`)
//! 2. TOML file (`rivet.toml`, explicit path or well-known locations)
//! 3. `RIVET_*` environment variables, nested keys split on `__`

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, ContainerConfig, LoggingConfig, RemoteConfig, SseConfig};
