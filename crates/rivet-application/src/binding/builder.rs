//! Binding and binding builder

use crate::binding::registry::BindingRegistry;
use crate::injector::Resolver;
use rivet_domain::error::Result;
use rivet_domain::value_objects::{BindingKey, Scope};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased instance; always holds an `Arc<I>` for the bound interface `I`
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased provider producing an [`Instance`]
pub type ProviderFn = Arc<dyn Fn(&Resolver<'_>) -> Result<Instance> + Send + Sync>;

/// Concrete component constructible from the container
///
/// ```ignore
/// impl Injectable for Repository {
///     fn inject(resolver: &Resolver<'_>) -> Result<Self> {
///         Ok(Self { pool: resolver.get::<dyn Pool>()? })
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Build an instance, resolving dependencies through `resolver`
    fn inject(resolver: &Resolver<'_>) -> Result<Self>;
}

/// A declared mapping from key to provider and scope
#[derive(Clone)]
pub struct Binding {
    pub(crate) key: BindingKey,
    pub(crate) scope: Scope,
    pub(crate) provider: ProviderFn,
    pub(crate) eager: bool,
    pub(crate) source: String,
}

impl Binding {
    /// Lookup key
    pub fn key(&self) -> &BindingKey {
        &self.key
    }

    /// Scope applied on resolution
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Whether a singleton binding is instantiated during assembly
    pub fn is_eager(&self) -> bool {
        self.eager
    }

    /// Module or class that declared the binding
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn provide(&self, resolver: &Resolver<'_>) -> Result<Instance> {
        (self.provider)(resolver)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("scope", &self.scope)
            .field("eager", &self.eager)
            .field("source", &self.source)
            .finish()
    }
}

/// Fluent builder returned by [`Binder::bind`](crate::binding::Binder::bind)
///
/// The binding is inserted into the registry when one of the `to_*`
/// terminal methods is called; insertion fails on a duplicate key.
#[must_use = "a binding is only registered by a to_* terminal method"]
pub struct BindingBuilder<'a, I: ?Sized + Send + Sync + 'static> {
    registry: &'a mut BindingRegistry,
    key: BindingKey,
    scope: Scope,
    eager: bool,
    source: String,
    _interface: PhantomData<fn() -> Arc<I>>,
}

impl<'a, I: ?Sized + Send + Sync + 'static> BindingBuilder<'a, I> {
    pub(crate) fn new(registry: &'a mut BindingRegistry, source: String) -> Self {
        Self {
            registry,
            key: BindingKey::of::<I>(),
            scope: Scope::Instance,
            eager: false,
            source,
            _interface: PhantomData,
        }
    }

    /// Qualify the binding
    pub fn named(mut self, qualifier: impl Into<String>) -> Self {
        self.key = self.key.with_qualifier(qualifier);
        self
    }

    /// Set the scope
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Shorthand for `in_scope(Scope::Singleton)`
    pub fn singleton(self) -> Self {
        self.in_scope(Scope::Singleton)
    }

    /// Shorthand for `in_scope(Scope::Context)`
    pub fn in_context(self) -> Self {
        self.in_scope(Scope::Context)
    }

    /// Instantiate during assembly (singletons only)
    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    /// Bind to a provider closure
    pub fn to_provider<F>(self, provider: F) -> Result<()>
    where
        F: Fn(&Resolver<'_>) -> Result<Arc<I>> + Send + Sync + 'static,
    {
        let provider: ProviderFn =
            Arc::new(move |resolver: &Resolver<'_>| Ok(Arc::new(provider(resolver)?) as Instance));
        self.finish(provider)
    }

    /// Bind to an existing instance; the scope becomes singleton
    pub fn to_instance(mut self, instance: Arc<I>) -> Result<()> {
        self.scope = Scope::Singleton;
        let provider: ProviderFn =
            Arc::new(move |_: &Resolver<'_>| Ok(Arc::new(Arc::clone(&instance)) as Instance));
        self.finish(provider)
    }

    fn finish(self, provider: ProviderFn) -> Result<()> {
        self.registry.insert(Binding {
            key: self.key,
            scope: self.scope,
            provider,
            eager: self.eager,
            source: self.source,
        })
    }
}

impl<I: Injectable> BindingBuilder<'_, I> {
    /// Bind a concrete type to its own [`Injectable`] constructor
    pub fn to_self(self) -> Result<()> {
        self.to_provider(|resolver| Ok(Arc::new(I::inject(resolver)?)))
    }
}
