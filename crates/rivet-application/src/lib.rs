//! # Application Layer
//!
//! Binding and dispatch core of the Rivet container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`binding`] | Binding registry, fluent binder, `Injectable` |
//! | [`injector`] | Scope-aware resolution, singleton cache, scope contexts |
//! | [`descriptor`] | Managed class descriptors and the capability adapter |
//! | [`remote`] | Protocol-indexed remote factory registry |
//! | [`container`] | Assembly pipeline and the connector claim chain |
//! | [`ports`] | Module and Connector contracts, provider registry |

pub mod binding;
pub mod container;
pub mod descriptor;
pub mod injector;
pub mod ports;
pub mod remote;

pub use binding::{Binder, Binding, Injectable, Properties, module_bindings};
pub use container::{Container, ContainerBuilder};
pub use descriptor::{CapabilityAdapter, ClassMetadata, ManagedClass, ManagedMethod, MethodMetadata};
pub use injector::{Injector, Resolver, ScopeContext};
pub use ports::{Connector, Module};
pub use remote::{CollisionPolicy, RemoteFactoryRegistry};
