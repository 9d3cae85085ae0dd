//! Managed Class Descriptors
//!
//! Class scanners report each discovered class as [`ClassMetadata`]: a
//! name, the key it binds, how instances are produced, and the raw
//! annotations found on the class and its methods. The
//! [`CapabilityAdapter`] turns that metadata into a read-only
//! [`ManagedClass`] whose capability tags are computed once, folding every
//! marker variant of the same meaning (legacy and current namespaces) into
//! one tag.

use crate::binding::{Injectable, Instance, ProviderFn};
use crate::injector::Resolver;
use crate::remote::RemoteFactoryRegistry;
use rivet_domain::constants::{
    LEGACY_PATH_MARKER, LEGACY_REMOTE_MARKER, LOCAL_MARKER, PATH_MARKER, REMOTE_CLIENT_MARKER,
    REMOTE_MARKER, SCOPE_MARKER, URL_ATTRIBUTE,
};
use rivet_domain::error::{Error, Result};
use rivet_domain::ports::RemoteInterface;
use rivet_domain::value_objects::{Annotation, BindingKey, Capability, RemoteUrl, Scope};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Builds a client proxy instance through the remote factory registry
pub type RemoteClientBuilder =
    Arc<dyn Fn(&RemoteFactoryRegistry, &RemoteUrl) -> Result<Instance> + Send + Sync>;

/// How instances of a managed class are produced
#[derive(Clone)]
pub enum ClassSource {
    /// Local component built by a provider
    Component(ProviderFn),
    /// Client proxy for a remote interface served at `url`
    RemoteClient {
        /// Endpoint of the remote implementation
        url: RemoteUrl,
        /// Proxy builder
        build: RemoteClientBuilder,
    },
}

/// Raw metadata of one method
#[derive(Debug, Clone)]
pub struct MethodMetadata {
    name: String,
    annotations: Vec<Annotation>,
}

impl MethodMetadata {
    /// Method without annotations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// Add an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Raw metadata of one discovered class, as reported by a scanner
#[derive(Clone)]
pub struct ClassMetadata {
    name: String,
    key: BindingKey,
    source: ClassSource,
    annotations: Vec<Annotation>,
    methods: Vec<MethodMetadata>,
}

impl ClassMetadata {
    /// Class bound under `I` and built by `provider`
    pub fn component<I, F>(name: impl Into<String>, provider: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<I>> + Send + Sync + 'static,
    {
        let provider: ProviderFn =
            Arc::new(move |resolver: &Resolver<'_>| Ok(Arc::new(provider(resolver)?) as Instance));
        Self::with_source(name, BindingKey::of::<I>(), ClassSource::Component(provider))
    }

    /// Concrete class bound under its own type
    pub fn injectable<T: Injectable>(name: impl Into<String>) -> Self {
        Self::component::<T, _>(name, |resolver| Ok(Arc::new(T::inject(resolver)?)))
    }

    /// Client proxy of the remote interface adapted by `C`, served at `url`
    pub fn remote_client<C: RemoteInterface>(url: &str) -> Result<Self> {
        let url = RemoteUrl::parse(url)?;
        let build: RemoteClientBuilder = Arc::new(|registry: &RemoteFactoryRegistry, url: &RemoteUrl| {
            let interface = registry.get_remote_instance::<C>(url.as_str(), Vec::new())?;
            Ok(Arc::new(interface) as Instance)
        });
        let annotation = Annotation::new(REMOTE_CLIENT_MARKER).attribute(URL_ATTRIBUTE, url.as_str());
        Ok(Self::with_source(
            C::NAME,
            BindingKey::of::<C::Interface>(),
            ClassSource::RemoteClient { url, build },
        )
        .annotate(annotation))
    }

    fn with_source(name: impl Into<String>, key: BindingKey, source: ClassSource) -> Self {
        Self {
            name: name.into(),
            key,
            source,
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a class annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Declare the class scope (adds a scope annotation)
    pub fn scope(self, scope: Scope) -> Self {
        self.annotate(Annotation::with_value(SCOPE_MARKER, scope.as_str()))
    }

    /// Bind under a qualifier
    pub fn qualified(mut self, qualifier: impl Into<String>) -> Self {
        self.key = self.key.with_qualifier(qualifier);
        self
    }

    /// Add a method
    pub fn method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ClassMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMetadata")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("annotations", &self.annotations)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Read-only descriptor of a method
#[derive(Debug, Clone)]
pub struct ManagedMethod {
    name: String,
    tagged: BTreeMap<Capability, Annotation>,
}

impl ManagedMethod {
    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the method carries a capability
    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.tagged.contains_key(capability)
    }

    /// Annotation that produced a capability
    pub fn capability_annotation(&self, capability: &Capability) -> Option<&Annotation> {
        self.tagged.get(capability)
    }

    /// Mapped sub-path, when the method is path-mapped
    pub fn path(&self) -> Option<&str> {
        self.capability_annotation(&Capability::PATH)
            .map(|a| a.value().unwrap_or(""))
    }
}

/// Read-only descriptor of a managed class
///
/// Shared by every connector during assembly; never mutated after
/// construction.
#[derive(Clone)]
pub struct ManagedClass {
    name: String,
    key: BindingKey,
    scope: Scope,
    source: ClassSource,
    annotations: Vec<Annotation>,
    tagged: BTreeMap<Capability, Annotation>,
    methods: Vec<ManagedMethod>,
}

impl ManagedClass {
    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key the class binds
    pub fn key(&self) -> &BindingKey {
        &self.key
    }

    /// Declared scope (instance when undeclared)
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// How instances are produced
    pub fn source(&self) -> &ClassSource {
        &self.source
    }

    /// Whether the class carries a capability
    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.tagged.contains_key(capability)
    }

    /// All capability tags
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.tagged.keys()
    }

    /// Annotation that produced a capability, whichever marker variant it used
    pub fn capability_annotation(&self, capability: &Capability) -> Option<&Annotation> {
        self.tagged.get(capability)
    }

    /// Raw annotation lookup by marker name
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    /// Method descriptors
    pub fn methods(&self) -> &[ManagedMethod] {
        &self.methods
    }

    /// Resource path of a path-mapped class
    pub fn path(&self) -> Option<&str> {
        self.capability_annotation(&Capability::PATH)
            .and_then(Annotation::value)
    }

    /// Name under which a remote-exposed class is published
    ///
    /// The remote marker's `value` when present, the class name otherwise.
    pub fn remote_name(&self) -> &str {
        self.capability_annotation(&Capability::REMOTE)
            .and_then(Annotation::value)
            .unwrap_or(self.name.as_str())
    }
}

impl fmt::Debug for ManagedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedClass")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("scope", &self.scope)
            .field("capabilities", &self.tagged.keys().collect::<Vec<_>>())
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Maps annotation marker names to capability tags
#[derive(Debug, Clone)]
pub struct CapabilityAdapter {
    markers: Vec<(String, Capability)>,
}

impl Default for CapabilityAdapter {
    fn default() -> Self {
        let markers = [
            (REMOTE_MARKER, Capability::REMOTE),
            (LEGACY_REMOTE_MARKER, Capability::REMOTE),
            (PATH_MARKER, Capability::PATH),
            (LEGACY_PATH_MARKER, Capability::PATH),
            (REMOTE_CLIENT_MARKER, Capability::REMOTE_CLIENT),
            (SCOPE_MARKER, Capability::SCOPED),
            (LOCAL_MARKER, Capability::LOCAL),
        ];
        Self {
            markers: markers
                .into_iter()
                .map(|(marker, capability)| (marker.to_string(), capability))
                .collect(),
        }
    }
}

impl CapabilityAdapter {
    /// Map an additional marker name to a capability
    pub fn with_marker(mut self, marker: impl Into<String>, capability: Capability) -> Self {
        self.markers.push((marker.into(), capability));
        self
    }

    fn capability_of(&self, marker: &str) -> Option<&Capability> {
        self.markers
            .iter()
            .find(|(name, _)| name == marker)
            .map(|(_, capability)| capability)
    }

    fn tag(&self, annotations: &[Annotation]) -> BTreeMap<Capability, Annotation> {
        let mut tagged = BTreeMap::new();
        for annotation in annotations {
            if let Some(capability) = self.capability_of(&annotation.name) {
                tagged
                    .entry(capability.clone())
                    .or_insert_with(|| annotation.clone());
            }
        }
        tagged
    }

    /// Capability tags produced by a set of annotations
    pub fn capabilities_of(&self, annotations: &[Annotation]) -> BTreeSet<Capability> {
        self.tag(annotations).into_keys().collect()
    }

    /// Build the descriptor of a scanned class
    pub fn describe(&self, metadata: ClassMetadata) -> Result<ManagedClass> {
        let tagged = self.tag(&metadata.annotations);
        let scope = match tagged.get(&Capability::SCOPED).and_then(Annotation::value) {
            Some(value) => value.parse::<Scope>().map_err(|e| {
                Error::configuration(format!("Class '{}': {e}", metadata.name))
            })?,
            None => Scope::Instance,
        };
        let methods = metadata
            .methods
            .into_iter()
            .map(|method| ManagedMethod {
                tagged: self.tag(&method.annotations),
                name: method.name,
            })
            .collect();
        Ok(ManagedClass {
            name: metadata.name,
            key: metadata.key,
            scope,
            source: metadata.source,
            annotations: metadata.annotations,
            tagged,
            methods,
        })
    }
}
