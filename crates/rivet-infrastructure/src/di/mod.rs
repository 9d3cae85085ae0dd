//! Container Bootstrap
//!
//! Composition root: resolves the linkme-registered remote factory
//! providers, installs the infrastructure module and the default connector
//! chain, then hands everything to the application layer's
//! [`ContainerBuilder`](rivet_application::ContainerBuilder).
//!
//! ```text
//! AppConfig ──► linkme providers ──► ContainerBuilder ──► Container
//!     │                                   ▲
//!     └──► InfrastructureModule ──────────┤
//!          Rmi → Rest → RemoteClient ─────┘
//! ```

pub mod bootstrap;
pub mod modules;

pub use bootstrap::{AppContext, Bootstrap, init_app};
pub use modules::InfrastructureModule;
