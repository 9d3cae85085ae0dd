//! Provider Registry System
//!
//! Compile-time registration of remote factory providers using `linkme`
//! distributed slices. Provider crates add entries; container assembly
//! resolves them into provider instances and builds the protocol map.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(REMOTE_FACTORY_PROVIDERS)]
//!                       static ENTRY: RemoteFactoryProviderEntry = ...
//! 2. Assembly queries:  resolve_remote_factory_providers(&config)
//! 3. Registry builds:   RemoteFactoryRegistry::from_providers(..)
//! ```

pub mod remote;

pub use remote::{
    REMOTE_FACTORY_PROVIDERS, RemoteFactoryProviderEntry, RemoteProviderConfig,
    list_remote_factory_providers, resolve_remote_factory_providers,
};
