//! Raw annotation data reported by class scanners

use crate::constants::VALUE_ATTRIBUTE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One annotation found on a class or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully qualified marker name (e.g. `rivet::Remote`)
    pub name: String,
    /// Annotation attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Annotation {
    /// Annotation without attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Annotation with a single `value` attribute
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).attribute(VALUE_ATTRIBUTE, value)
    }

    /// Add an attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Primary `value` attribute
    pub fn value(&self) -> Option<&str> {
        self.get(VALUE_ATTRIBUTE)
    }

    /// Whether this annotation has one of the given marker names
    pub fn is_any(&self, names: &[&str]) -> bool {
        names.contains(&self.name.as_str())
    }
}
