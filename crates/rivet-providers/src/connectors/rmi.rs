//! RMI connector
//!
//! Claims remote-exposed classes and publishes them under their remote
//! name. Methods marked local stay out of the endpoint table.

use dashmap::DashMap;
use rivet_application::{Binder, Connector, ManagedClass};
use rivet_domain::error::{Error, Result};
use rivet_domain::value_objects::{BindingKey, Capability};
use std::sync::Arc;
use tracing::debug;

/// One published remote endpoint
#[derive(Debug, Clone)]
pub struct RmiEndpoint {
    name: String,
    class: String,
    key: BindingKey,
    methods: Vec<String>,
}

impl RmiEndpoint {
    /// Remote name clients address
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Managed class serving the endpoint
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Binding key resolving the serving instance
    pub fn key(&self) -> &BindingKey {
        &self.key
    }

    /// Remotely invocable methods
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Whether a method may be invoked remotely
    pub fn exposes(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Remote name → endpoint table filled during assembly
#[derive(Debug, Default)]
pub struct RmiEndpointTable {
    endpoints: DashMap<String, RmiEndpoint>,
}

impl RmiEndpointTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an endpoint; a remote name can be published once
    pub fn register(&self, endpoint: RmiEndpoint) -> Result<()> {
        if let Some(existing) = self.endpoints.get(&endpoint.name) {
            return Err(Error::configuration(format!(
                "Remote name '{}' published by both '{}' and '{}'",
                endpoint.name, existing.class, endpoint.class
            )));
        }
        self.endpoints.insert(endpoint.name.clone(), endpoint);
        Ok(())
    }

    /// Look up an endpoint by remote name
    pub fn get(&self, name: &str) -> Option<RmiEndpoint> {
        self.endpoints.get(name).map(|e| e.value().clone())
    }

    /// Published remote names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.endpoints.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Number of endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether nothing is published
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Connector for remote-exposed classes
#[derive(Debug, Default)]
pub struct RmiConnector {
    endpoints: Arc<RmiEndpointTable>,
}

impl RmiConnector {
    /// Connector with an empty endpoint table
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint table shared with the container
    pub fn endpoints(&self) -> &Arc<RmiEndpointTable> {
        &self.endpoints
    }
}

impl Connector for RmiConnector {
    fn name(&self) -> &str {
        "rmi"
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder
            .bind::<RmiEndpointTable>()
            .to_instance(Arc::clone(&self.endpoints))
    }

    fn bind(&self, class: &ManagedClass, binder: &mut Binder<'_>) -> Result<bool> {
        if !class.has_capability(&Capability::REMOTE) {
            return Ok(false);
        }
        binder.bind_class(class)?;

        let methods: Vec<String> = class
            .methods()
            .iter()
            .filter(|m| !m.has_capability(&Capability::LOCAL))
            .map(|m| m.name().to_string())
            .collect();
        debug!(class = class.name(), remote = class.remote_name(), methods = methods.len(), "RMI endpoint published");
        self.endpoints.register(RmiEndpoint {
            name: class.remote_name().to_string(),
            class: class.name().to_string(),
            key: class.key().clone(),
            methods,
        })?;
        Ok(true)
    }
}
