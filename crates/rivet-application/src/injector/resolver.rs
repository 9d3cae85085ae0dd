//! Per-resolution state: scope context and cycle detection path

use super::Injector;
use super::context::ContextCache;
use crate::binding::{Binding, Instance};
use rivet_domain::error::{Error, Result};
use rivet_domain::value_objects::{BindingKey, Scope};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, trace};

/// Handle passed to providers for resolving their dependencies
///
/// Every key entered on the current resolution path is tracked; entering
/// a key that is already on the path fails with `CircularDependency`
/// instead of recursing.
pub struct Resolver<'a> {
    injector: &'a Injector,
    context: Option<&'a ContextCache>,
    path: Rc<RefCell<Vec<BindingKey>>>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(injector: &'a Injector, context: Option<&'a ContextCache>) -> Self {
        Self {
            injector,
            context,
            path: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Resolve an unqualified binding of `I`
    pub fn get<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
        downcast::<I>(&self.resolve(&BindingKey::of::<I>())?)
    }

    /// Resolve a qualified binding of `I`
    pub fn get_named<I: ?Sized + Send + Sync + 'static>(&self, qualifier: &str) -> Result<Arc<I>> {
        downcast::<I>(&self.resolve(&BindingKey::qualified::<I>(qualifier))?)
    }

    /// Resolve `I` if bound, `None` otherwise
    pub fn get_optional<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<I>>> {
        let key = BindingKey::of::<I>();
        if !self.injector.contains_key(&key) {
            return Ok(None);
        }
        downcast::<I>(&self.resolve(&key)?).map(Some)
    }

    /// Whether an unqualified binding of `I` exists
    ///
    /// Providers query the container only through this resolver, so every
    /// nested resolution stays on the tracked path.
    pub fn contains<I: ?Sized + 'static>(&self) -> bool {
        self.injector.contains_key(&BindingKey::of::<I>())
    }

    /// Resolve a key to its type-erased instance
    pub fn resolve(&self, key: &BindingKey) -> Result<Instance> {
        let binding = self
            .injector
            .registry()
            .get(key)
            .ok_or_else(|| Error::binding_not_found(key.to_string()))?;

        self.enter(key)?;
        let result = match binding.scope() {
            Scope::Instance => binding.provide(self),
            Scope::Singleton => self.singleton(binding),
            Scope::Context => self.contextual(binding),
        };
        self.path.borrow_mut().pop();
        result
    }

    fn enter(&self, key: &BindingKey) -> Result<()> {
        let mut path = self.path.borrow_mut();
        if path.contains(key) {
            let mut cycle: Vec<String> = path.iter().map(ToString::to_string).collect();
            cycle.push(key.to_string());
            return Err(Error::circular_dependency(cycle));
        }
        trace!(key = %key, depth = path.len(), "Resolving binding");
        path.push(key.clone());
        Ok(())
    }

    fn singleton(&self, binding: &Binding) -> Result<Instance> {
        let cell = self.injector.singleton_cell(binding.key());
        // Singletons never capture context-scoped instances
        let root = Resolver {
            injector: self.injector,
            context: None,
            path: Rc::clone(&self.path),
        };
        cell.get_or_try_init(|| {
            debug!(key = %binding.key(), "Creating singleton");
            binding.provide(&root)
        })
        .cloned()
    }

    fn contextual(&self, binding: &Binding) -> Result<Instance> {
        let context = self
            .context
            .ok_or_else(|| Error::scope_not_active(binding.key().to_string()))?;
        context
            .cell(binding.key())
            .get_or_try_init(|| {
                debug!(key = %binding.key(), context = %context.id(), "Creating context instance");
                binding.provide(self)
            })
            .cloned()
    }
}

pub(crate) fn downcast<I: ?Sized + Send + Sync + 'static>(instance: &Instance) -> Result<Arc<I>> {
    (**instance)
        .downcast_ref::<Arc<I>>()
        .cloned()
        .ok_or_else(|| Error::type_mismatch(std::any::type_name::<I>()))
}
