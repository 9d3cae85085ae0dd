//! REST connector
//!
//! Claims path-mapped classes. The resource path of the class and the
//! sub-paths of its path-mapped methods form the routes of the resource.

use dashmap::DashMap;
use rivet_application::{Binder, Connector, ManagedClass};
use rivet_domain::error::{Error, Result};
use rivet_domain::value_objects::{BindingKey, Capability};
use std::sync::Arc;
use tracing::debug;

/// Normalize a path to `/a/b` form
fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Route to one resource method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRoute {
    /// Full normalized path
    pub path: String,
    /// Method serving the path; `None` for the resource root
    pub method: Option<String>,
}

/// One path-mapped resource
#[derive(Debug, Clone)]
pub struct RestResource {
    path: String,
    class: String,
    key: BindingKey,
    routes: Vec<RestRoute>,
}

impl RestResource {
    /// Normalized resource path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Managed class serving the resource
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Binding key resolving the resource instance
    pub fn key(&self) -> &BindingKey {
        &self.key
    }

    /// Method routes, in declaration order
    pub fn routes(&self) -> &[RestRoute] {
        &self.routes
    }
}

/// Resource path → resource table filled during assembly
#[derive(Debug, Default)]
pub struct RestResourceTable {
    resources: DashMap<String, RestResource>,
}

impl RestResourceTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource; a path can be mapped once
    pub fn register(&self, resource: RestResource) -> Result<()> {
        if let Some(existing) = self.resources.get(&resource.path) {
            return Err(Error::configuration(format!(
                "Path '{}' mapped by both '{}' and '{}'",
                resource.path, existing.class, resource.class
            )));
        }
        self.resources.insert(resource.path.clone(), resource);
        Ok(())
    }

    /// Resource mapped at a path
    pub fn get(&self, path: &str) -> Option<RestResource> {
        self.resources.get(&normalize(path)).map(|r| r.value().clone())
    }

    /// Find the resource and route serving a request path
    pub fn route(&self, path: &str) -> Option<(RestResource, RestRoute)> {
        let path = normalize(path);
        self.resources.iter().find_map(|entry| {
            let resource = entry.value();
            resource
                .routes
                .iter()
                .find(|route| route.path == path)
                .map(|route| (resource.clone(), route.clone()))
        })
    }

    /// Mapped resource paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.resources.iter().map(|r| r.key().clone()).collect();
        paths.sort_unstable();
        paths
    }

    /// Number of resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resource is mapped
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Connector for path-mapped resource classes
#[derive(Debug, Default)]
pub struct RestConnector {
    resources: Arc<RestResourceTable>,
}

impl RestConnector {
    /// Connector with an empty resource table
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource table shared with the container
    pub fn resources(&self) -> &Arc<RestResourceTable> {
        &self.resources
    }
}

impl Connector for RestConnector {
    fn name(&self) -> &str {
        "rest"
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder
            .bind::<RestResourceTable>()
            .to_instance(Arc::clone(&self.resources))
    }

    fn bind(&self, class: &ManagedClass, binder: &mut Binder<'_>) -> Result<bool> {
        if !class.has_capability(&Capability::PATH) {
            return Ok(false);
        }
        binder.bind_class(class)?;

        let path = normalize(class.path().unwrap_or_default());
        let mut routes = vec![RestRoute {
            path: path.clone(),
            method: None,
        }];
        for method in class.methods() {
            if let Some(sub) = method.path() {
                routes.push(RestRoute {
                    path: normalize(&format!("{path}/{sub}")),
                    method: Some(method.name().to_string()),
                });
            }
        }
        debug!(class = class.name(), path = %path, routes = routes.len(), "REST resource mapped");
        self.resources.register(RestResource {
            path,
            class: class.name().to_string(),
            key: class.key().clone(),
            routes,
        })?;
        Ok(true)
    }
}
