//! # Rivet
//!
//! An inversion-of-control container: modules declare bindings, an
//! injector resolves them under instance, singleton or per-context scope,
//! connectors claim annotated classes, remote interfaces resolve to
//! protocol-specific proxies, and an SSE broadcaster fans events out to
//! subscriber channels.
//!
//! ## Example
//!
//! ```ignore
//! use rivet::{AppConfig, Bootstrap};
//!
//! let context = Bootstrap::new(AppConfig::default())?
//!     .module(OrdersModule)
//!     .build()?;
//! let orders = context.container().get_instance::<dyn Orders>()?;
//! ```
//!
//! ## Layers
//!
//! - `domain` - errors, value objects and port traits
//! - `application` - binding registry, injector and container assembly
//! - `infrastructure` - configuration, logging and bootstrap
//! - `providers` - connectors, HTTP remote factory and SSE

/// Domain layer - errors, value objects, ports
pub mod domain {
    pub use rivet_domain::*;
}

/// Application layer - bindings, injector, container
pub mod application {
    pub use rivet_application::*;
}

/// Infrastructure layer - configuration, logging, bootstrap
pub mod infrastructure {
    pub use rivet_infrastructure::*;
}

/// Providers - connectors, remote factories, SSE
pub mod providers {
    pub use rivet_providers::*;
}

pub use rivet_application::{
    Binder, ClassMetadata, Connector, Container, ContainerBuilder, Injector, Module, Resolver,
    ScopeContext,
};
pub use rivet_domain::error::{Error, Result};
pub use rivet_infrastructure::{AppConfig, AppContext, Bootstrap, ConfigLoader, init_app};
pub use rivet_providers::{Sse, SseBroadcaster};
