//! Static property provider

use rivet_domain::ports::PropertyProvider;
use std::collections::BTreeMap;

/// Property provider returning a fixed set of properties on every call
///
/// ```ignore
/// let auth = StaticPropertyProvider::new().with("authorization", "Bearer t0k3n");
/// let client = registry.get_remote_instance::<CalculatorClient>(url, vec![Arc::new(auth)])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPropertyProvider {
    properties: BTreeMap<String, String>,
}

impl StaticPropertyProvider {
    /// Provider without properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticPropertyProvider {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PropertyProvider for StaticPropertyProvider {
    fn properties(&self) -> BTreeMap<String, String> {
        self.properties.clone()
    }
}
