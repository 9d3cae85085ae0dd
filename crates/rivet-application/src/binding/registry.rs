//! Ordered, duplicate-checked binding set

use crate::binding::builder::Binding;
use rivet_domain::error::{Error, Result};
use rivet_domain::value_objects::BindingKey;
use std::collections::HashMap;
use tracing::debug;

/// Bindings keyed by (type, qualifier), kept in declaration order
#[derive(Debug, Default, Clone)]
pub struct BindingRegistry {
    bindings: HashMap<BindingKey, Binding>,
    order: Vec<BindingKey>,
}

impl BindingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding; a second binding for the same key is rejected
    pub fn insert(&mut self, binding: Binding) -> Result<()> {
        if let Some(existing) = self.bindings.get(&binding.key) {
            return Err(Error::duplicate_binding(format!(
                "{} (declared by '{}' and '{}')",
                binding.key, existing.source, binding.source
            )));
        }
        debug!(key = %binding.key, scope = %binding.scope, source = %binding.source, "Binding registered");
        self.order.push(binding.key.clone());
        self.bindings.insert(binding.key.clone(), binding);
        Ok(())
    }

    /// Look up a binding
    pub fn get(&self, key: &BindingKey) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Whether a key is bound
    pub fn contains(&self, key: &BindingKey) -> bool {
        self.bindings.contains_key(key)
    }

    /// Bindings in declaration order
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.order.iter().filter_map(|key| self.bindings.get(key))
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
