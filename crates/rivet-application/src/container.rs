//! Container assembly
//!
//! [`ContainerBuilder::build`] runs the assembly pipeline once:
//!
//! ```text
//! providers ──► RemoteFactoryRegistry      (fail fast on protocol collision)
//! modules   ──► BindingRegistry            (fail fast on duplicate key)
//! connectors.configure()                   (shared transport services)
//! classes   ──► CapabilityAdapter ──► claim loop (first connector wins)
//!                                          └─► unclaimed: plain component
//! BindingRegistry ──► Injector (frozen) ──► eager singletons
//! ```

use crate::binding::{Binder, BindingRegistry, Properties};
use crate::descriptor::{CapabilityAdapter, ClassMetadata, ManagedClass};
use crate::injector::{Injector, ScopeContext};
use crate::ports::{Connector, Module};
use crate::remote::{CollisionPolicy, RemoteFactoryRegistry};
use rivet_domain::error::Result;
use rivet_domain::ports::RemoteFactoryProvider;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Source name recorded for bindings the container makes itself
const CONTAINER_SOURCE: &str = "container";

/// Collects everything a container is assembled from
#[derive(Default)]
pub struct ContainerBuilder {
    properties: Properties,
    modules: Vec<Arc<dyn Module>>,
    connectors: Vec<Arc<dyn Connector>>,
    providers: Vec<Arc<dyn RemoteFactoryProvider>>,
    classes: Vec<ClassMetadata>,
    adapter: CapabilityAdapter,
    collision_policy: CollisionPolicy,
    eager_singletons: bool,
}

impl ContainerBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a container property visible to modules and connectors
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add a module; modules are configured in the order added
    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    /// Add a shared module
    pub fn module_arc(mut self, module: Arc<dyn Module>) -> Self {
        self.modules.push(module);
        self
    }

    /// Append a connector to the claim chain
    pub fn connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connectors.push(Arc::new(connector));
        self
    }

    /// Append a shared connector to the claim chain
    pub fn connector_arc(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Register a remote factory provider
    pub fn remote_factory_provider(mut self, provider: Arc<dyn RemoteFactoryProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Register several remote factory providers
    pub fn remote_factory_providers(
        mut self,
        providers: impl IntoIterator<Item = Arc<dyn RemoteFactoryProvider>>,
    ) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Add a scanned managed class
    pub fn class(mut self, class: ClassMetadata) -> Self {
        self.classes.push(class);
        self
    }

    /// Replace the annotation → capability adapter
    pub fn capability_adapter(mut self, adapter: CapabilityAdapter) -> Self {
        self.adapter = adapter;
        self
    }

    /// Policy for two providers declaring the same protocol
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Instantiate every singleton during assembly, not only eager ones
    pub fn eager_singletons(mut self, eager: bool) -> Self {
        self.eager_singletons = eager;
        self
    }

    /// Assemble the container
    ///
    /// # Errors
    ///
    /// Any configuration error aborts assembly: protocol collision,
    /// duplicate binding, invalid class metadata, a connector rejecting a
    /// class, or a failing eager singleton.
    pub fn build(self) -> Result<Container> {
        let remote = Arc::new(RemoteFactoryRegistry::from_providers(
            &self.providers,
            self.collision_policy,
        )?);

        let mut registry = BindingRegistry::new();
        {
            let mut binder = Binder::new(&mut registry, &remote, &self.properties, CONTAINER_SOURCE);
            binder
                .bind::<RemoteFactoryRegistry>()
                .to_instance(Arc::clone(&remote))?;
        }

        for module in &self.modules {
            let mut binder = Binder::new(&mut registry, &remote, &self.properties, module.name());
            module.configure(&mut binder)?;
            debug!(module = module.name(), "Module configured");
        }

        for connector in &self.connectors {
            let mut binder =
                Binder::new(&mut registry, &remote, &self.properties, connector.name());
            connector.configure(&mut binder)?;
            debug!(connector = connector.name(), "Connector configured");
        }

        let mut descriptors = Vec::with_capacity(self.classes.len());
        let mut owners = BTreeMap::new();
        for metadata in self.classes {
            let class = self.adapter.describe(metadata)?;
            let owner = claim(&self.connectors, &class, &mut registry, &remote, &self.properties)?;
            if let Some(owner) = &owner {
                owners.insert(class.name().to_string(), owner.clone());
            }
            descriptors.push(Arc::new(class));
        }

        let injector = Injector::new(registry);
        let eager = injector.instantiate_eager(self.eager_singletons)?;

        info!(
            bindings = injector.bindings().count(),
            classes = descriptors.len(),
            claimed = owners.len(),
            protocols = remote.len(),
            eager,
            "Container assembled"
        );

        Ok(Container {
            injector,
            remote,
            descriptors,
            owners,
            properties: self.properties,
        })
    }
}

/// Offer a class to the connector chain; unclaimed classes bind as plain components
fn claim(
    connectors: &[Arc<dyn Connector>],
    class: &ManagedClass,
    registry: &mut BindingRegistry,
    remote: &Arc<RemoteFactoryRegistry>,
    properties: &Properties,
) -> Result<Option<String>> {
    for connector in connectors {
        let mut binder = Binder::new(registry, remote, properties, connector.name());
        if connector.bind(class, &mut binder)? {
            debug!(class = class.name(), connector = connector.name(), "Class claimed");
            return Ok(Some(connector.name().to_string()));
        }
    }
    let mut binder = Binder::new(registry, remote, properties, class.name());
    binder.bind_class(class)?;
    debug!(class = class.name(), "Class bound as plain component");
    Ok(None)
}

/// An assembled container
pub struct Container {
    injector: Injector,
    remote: Arc<RemoteFactoryRegistry>,
    descriptors: Vec<Arc<ManagedClass>>,
    owners: BTreeMap<String, String>,
    properties: Properties,
}

impl Container {
    /// Start assembling a container
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Frozen injector
    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    /// Resolve an unqualified binding of `I`
    pub fn get_instance<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
        self.injector.get_instance::<I>()
    }

    /// Resolve a qualified binding of `I`
    pub fn get_named<I: ?Sized + Send + Sync + 'static>(&self, qualifier: &str) -> Result<Arc<I>> {
        self.injector.get_named::<I>(qualifier)
    }

    /// Protocol-indexed remote factories
    pub fn remote_factories(&self) -> &Arc<RemoteFactoryRegistry> {
        &self.remote
    }

    /// Managed class descriptors in registration order
    pub fn descriptors(&self) -> &[Arc<ManagedClass>] {
        &self.descriptors
    }

    /// Descriptor of a managed class by name
    pub fn descriptor(&self, class: &str) -> Option<&Arc<ManagedClass>> {
        self.descriptors.iter().find(|d| d.name() == class)
    }

    /// Connector that claimed a class; `None` for plain components
    pub fn owner_of(&self, class: &str) -> Option<&str> {
        self.owners.get(class).map(String::as_str)
    }

    /// Container properties
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Open a per-request scope context
    pub fn enter_scope(&self) -> ScopeContext {
        self.injector.enter_scope()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("injector", &self.injector)
            .field("remote", &self.remote)
            .field("classes", &self.descriptors.len())
            .field("owners", &self.owners)
            .finish_non_exhaustive()
    }
}
