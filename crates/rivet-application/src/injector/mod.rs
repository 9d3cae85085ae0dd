//! Injector
//!
//! Resolves binding keys to instances, applying scope discipline:
//!
//! | Scope | Cache | Created |
//! |-------|-------|---------|
//! | `Instance` | none | on every resolution |
//! | `Singleton` | injector-wide | at most once, even under concurrent first access |
//! | `Context` | per [`ScopeContext`] | once per context, discarded when the context drops |
//!
//! The binding set is frozen when the injector is built; only the
//! singleton cache and context caches change at runtime.

mod context;
mod resolver;

pub use context::ScopeContext;
pub use resolver::Resolver;

use crate::binding::{Binding, BindingRegistry, Instance};
use context::ContextCache;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use rivet_domain::error::Result;
use rivet_domain::value_objects::{BindingKey, Scope};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) type InstanceCell = Arc<OnceCell<Instance>>;

struct InjectorInner {
    registry: BindingRegistry,
    singletons: DashMap<BindingKey, InstanceCell>,
}

/// Frozen binding set plus the singleton cache
#[derive(Clone)]
pub struct Injector {
    inner: Arc<InjectorInner>,
}

impl Injector {
    /// Freeze a registry into an injector
    pub fn new(registry: BindingRegistry) -> Self {
        debug!(bindings = registry.len(), "Injector frozen");
        Self {
            inner: Arc::new(InjectorInner {
                registry,
                singletons: DashMap::new(),
            }),
        }
    }

    /// Resolve an unqualified binding of `I`
    pub fn get_instance<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
        self.resolver(None).get::<I>()
    }

    /// Resolve a qualified binding of `I`
    pub fn get_named<I: ?Sized + Send + Sync + 'static>(&self, qualifier: &str) -> Result<Arc<I>> {
        self.resolver(None).get_named::<I>(qualifier)
    }

    /// Resolve a binding by key, returning the type-erased instance
    pub fn get_by_key(&self, key: &BindingKey) -> Result<Instance> {
        self.resolver(None).resolve(key)
    }

    /// Whether an unqualified binding of `I` exists
    pub fn contains<I: ?Sized + 'static>(&self) -> bool {
        self.inner.registry.contains(&BindingKey::of::<I>())
    }

    /// Whether the key is bound
    pub fn contains_key(&self, key: &BindingKey) -> bool {
        self.inner.registry.contains(key)
    }

    /// Look up a binding
    pub fn binding(&self, key: &BindingKey) -> Option<&Binding> {
        self.inner.registry.get(key)
    }

    /// Bindings in declaration order
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.inner.registry.bindings()
    }

    /// Number of singletons created so far
    pub fn singleton_count(&self) -> usize {
        self.inner
            .singletons
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Open a per-request context for context-scoped bindings
    pub fn enter_scope(&self) -> ScopeContext {
        ScopeContext::new(self.clone())
    }

    /// Instantiate singletons during assembly
    ///
    /// Only bindings marked eager are created unless `all_singletons` is set.
    pub(crate) fn instantiate_eager(&self, all_singletons: bool) -> Result<usize> {
        let keys: Vec<BindingKey> = self
            .bindings()
            .filter(|b| b.scope() == Scope::Singleton && (all_singletons || b.is_eager()))
            .map(|b| b.key().clone())
            .collect();
        for key in &keys {
            self.resolver(None).resolve(key)?;
        }
        if !keys.is_empty() {
            info!(count = keys.len(), "Eager singletons instantiated");
        }
        Ok(keys.len())
    }

    pub(crate) fn resolver<'a>(&'a self, context: Option<&'a ContextCache>) -> Resolver<'a> {
        Resolver::new(self, context)
    }

    pub(crate) fn registry(&self) -> &BindingRegistry {
        &self.inner.registry
    }

    pub(crate) fn singleton_cell(&self, key: &BindingKey) -> InstanceCell {
        // Clone the cell out so the map shard lock is released before initialization
        self.inner
            .singletons
            .entry(key.clone())
            .or_default()
            .clone()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("bindings", &self.inner.registry.len())
            .field("singletons", &self.singleton_count())
            .finish()
    }
}
