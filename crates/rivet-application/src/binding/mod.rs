//! Binding Registry
//!
//! Bindings map a [`BindingKey`](rivet_domain::value_objects::BindingKey)
//! to a provider and a scope. Modules and connectors contribute bindings
//! through a [`Binder`]; the resulting [`BindingRegistry`] is frozen inside
//! the injector once assembly completes.

pub mod binder;
pub mod builder;
pub mod registry;

pub use binder::{Binder, Properties, module_bindings};
pub use builder::{Binding, BindingBuilder, Injectable, Instance, ProviderFn};
pub use registry::BindingRegistry;
