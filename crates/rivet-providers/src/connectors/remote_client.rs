//! Remote client connector
//!
//! Claims remote client classes and checks at assembly time that a remote
//! factory serves their protocol, so a misconfigured client fails startup
//! instead of its first resolution.

use rivet_application::descriptor::ClassSource;
use rivet_application::{Binder, Connector, ManagedClass};
use rivet_domain::error::{Error, Result};
use rivet_domain::value_objects::Capability;
use tracing::debug;

/// Connector for remote client proxies
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoteClientConnector;

impl RemoteClientConnector {
    /// Create the connector
    pub fn new() -> Self {
        Self
    }
}

impl Connector for RemoteClientConnector {
    fn name(&self) -> &str {
        "remote-client"
    }

    fn bind(&self, class: &ManagedClass, binder: &mut Binder<'_>) -> Result<bool> {
        if !class.has_capability(&Capability::REMOTE_CLIENT) {
            return Ok(false);
        }
        let ClassSource::RemoteClient { url, .. } = class.source() else {
            return Err(Error::configuration(format!(
                "Class '{}' is marked as a remote client but is built locally",
                class.name()
            )));
        };
        if !binder.remote_factories().supports(url) {
            return Err(Error::unsupported_protocol(url.protocol().as_str()));
        }
        binder.bind_class(class)?;
        debug!(class = class.name(), url = %url, "Remote client bound");
        Ok(true)
    }
}
