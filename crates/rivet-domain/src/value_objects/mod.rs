//! Value Objects
//!
//! Immutable types identified by their value rather than by identity.

pub mod annotation;
pub mod binding_key;
pub mod capability;
pub mod event;
pub mod remote_url;
pub mod scope;

pub use annotation::Annotation;
pub use binding_key::BindingKey;
pub use capability::Capability;
pub use event::{EventBuilder, OutboundEvent};
pub use remote_url::{Protocol, RemoteUrl};
pub use scope::Scope;
