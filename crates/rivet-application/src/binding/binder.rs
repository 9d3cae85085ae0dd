//! Binder handed to modules and connectors during assembly

use crate::binding::builder::{Binding, BindingBuilder, ProviderFn};
use crate::binding::registry::BindingRegistry;
use crate::descriptor::{ClassSource, ManagedClass};
use crate::injector::Resolver;
use crate::ports::Module;
use crate::remote::RemoteFactoryRegistry;
use rivet_domain::error::Result;
use rivet_domain::value_objects::BindingKey;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Container properties visible to modules and connectors
pub type Properties = BTreeMap<String, String>;

/// Assembly-time view of the container
///
/// Modules use it to declare bindings and to consult what earlier modules
/// bound; connectors use it to push transport-specific bindings.
pub struct Binder<'a> {
    registry: &'a mut BindingRegistry,
    remote: &'a Arc<RemoteFactoryRegistry>,
    properties: &'a Properties,
    source: String,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(
        registry: &'a mut BindingRegistry,
        remote: &'a Arc<RemoteFactoryRegistry>,
        properties: &'a Properties,
        source: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            remote,
            properties,
            source: source.into(),
        }
    }

    /// Start a binding for `I`
    pub fn bind<I: ?Sized + Send + Sync + 'static>(&mut self) -> BindingBuilder<'_, I> {
        BindingBuilder::new(self.registry, self.source.clone())
    }

    /// Bind a managed class under its key and declared scope
    pub fn bind_class(&mut self, class: &ManagedClass) -> Result<()> {
        let provider: ProviderFn = match class.source() {
            ClassSource::Component(provider) => Arc::clone(provider),
            ClassSource::RemoteClient { url, build } => {
                let remote = Arc::clone(self.remote);
                let url = url.clone();
                let build = Arc::clone(build);
                Arc::new(move |_: &Resolver<'_>| build(&remote, &url))
            }
        };
        self.registry.insert(Binding {
            key: class.key().clone(),
            scope: class.scope(),
            provider,
            eager: false,
            source: class.name().to_string(),
        })
    }

    /// Configure a nested module into the same registry
    pub fn install(&mut self, module: &dyn Module) -> Result<()> {
        let previous = std::mem::replace(&mut self.source, module.name().to_string());
        let result = module.configure(self);
        self.source = previous;
        result
    }

    /// Whether `I` is already bound without qualifier
    pub fn is_bound<I: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(&BindingKey::of::<I>())
    }

    /// Whether the given key is already bound
    pub fn is_key_bound(&self, key: &BindingKey) -> bool {
        self.registry.contains(key)
    }

    /// Look up a container property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All container properties
    pub fn properties(&self) -> &Properties {
        self.properties
    }

    /// Protocol-indexed remote factories built for this container
    pub fn remote_factories(&self) -> &Arc<RemoteFactoryRegistry> {
        self.remote
    }

    /// Name recorded as the source of bindings made through this binder
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Configure a module in isolation and return its bindings in declaration order
pub fn module_bindings(module: &dyn Module) -> Result<Vec<Binding>> {
    let mut registry = BindingRegistry::new();
    let remote = Arc::new(RemoteFactoryRegistry::empty());
    let properties = Properties::new();
    let mut binder = Binder::new(&mut registry, &remote, &properties, module.name());
    module.configure(&mut binder)?;
    Ok(registry.bindings().cloned().collect())
}
