//! Binding key value object

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Lookup key of a binding: the bound type plus an optional qualifier
///
/// Equality and hashing use the [`TypeId`] and qualifier only; the type
/// name is carried for diagnostics.
#[derive(Clone)]
pub struct BindingKey {
    type_id: TypeId,
    type_name: &'static str,
    qualifier: Option<String>,
}

impl BindingKey {
    /// Key for an unqualified binding of `T`
    ///
    /// `T` may be unsized, so `dyn Trait` interfaces are valid keys.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            qualifier: None,
        }
    }

    /// Key for a binding of `T` under the given qualifier
    pub fn qualified<T: ?Sized + 'static>(qualifier: impl Into<String>) -> Self {
        Self::of::<T>().with_qualifier(qualifier)
    }

    /// Return this key with a qualifier attached
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Type identity of the bound interface
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Type name of the bound interface
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Qualifier, if any
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl PartialEq for BindingKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.qualifier == other.qualifier
    }
}

impl Eq for BindingKey {}

impl Hash for BindingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.qualifier.hash(state);
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}[{}]", self.type_name, qualifier),
            None => f.write_str(self.type_name),
        }
    }
}

impl fmt::Debug for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingKey({self})")
    }
}
