//! Per-request scope contexts

use super::{Injector, InstanceCell};
use crate::binding::Instance;
use dashmap::DashMap;
use rivet_domain::error::Result;
use rivet_domain::value_objects::BindingKey;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub(crate) struct ContextCache {
    id: Uuid,
    instances: DashMap<BindingKey, InstanceCell>,
}

impl ContextCache {
    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn cell(&self, key: &BindingKey) -> InstanceCell {
        self.instances.entry(key.clone()).or_default().clone()
    }

    fn len(&self) -> usize {
        self.instances
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }
}

/// One logical execution context (request, session, worker job)
///
/// Context-scoped bindings resolve to one instance per context. The
/// instances are discarded when the context is dropped. A context may be
/// shared by reference across the threads serving the same request.
pub struct ScopeContext {
    injector: Injector,
    cache: ContextCache,
}

impl ScopeContext {
    pub(crate) fn new(injector: Injector) -> Self {
        let cache = ContextCache {
            id: Uuid::new_v4(),
            instances: DashMap::new(),
        };
        debug!(context = %cache.id, "Scope context opened");
        Self { injector, cache }
    }

    /// Context identifier
    pub fn id(&self) -> Uuid {
        self.cache.id
    }

    /// Resolve an unqualified binding of `I` within this context
    pub fn get_instance<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
        self.injector.resolver(Some(&self.cache)).get::<I>()
    }

    /// Resolve a qualified binding of `I` within this context
    pub fn get_named<I: ?Sized + Send + Sync + 'static>(&self, qualifier: &str) -> Result<Arc<I>> {
        self.injector
            .resolver(Some(&self.cache))
            .get_named::<I>(qualifier)
    }

    /// Resolve a key within this context
    pub fn get_by_key(&self, key: &BindingKey) -> Result<Instance> {
        self.injector.resolver(Some(&self.cache)).resolve(key)
    }

    /// Number of context instances created so far
    pub fn instance_count(&self) -> usize {
        self.cache.len()
    }
}

impl Drop for ScopeContext {
    fn drop(&mut self) {
        debug!(context = %self.cache.id, instances = self.cache.len(), "Scope context closed");
    }
}
