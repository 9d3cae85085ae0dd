//! Remote Factory Provider Registry
//!
//! Auto-registration system for remote factory providers.

use rivet_domain::ports::RemoteFactoryProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration for remote factory provider creation
///
/// Providers use what they need and ignore the rest.
#[derive(Debug, Clone)]
pub struct RemoteProviderConfig {
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// User agent sent by HTTP-based transports
    pub user_agent: String,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl Default for RemoteProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("rivet/{}", env!("CARGO_PKG_VERSION")),
            extra: HashMap::new(),
        }
    }
}

impl RemoteProviderConfig {
    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout_secs(mut self, connect_timeout_secs: u64) -> Self {
        self.connect_timeout_secs = connect_timeout_secs;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for remote factory providers
pub struct RemoteFactoryProviderEntry {
    /// Unique provider name (e.g., "http")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the provider
    pub factory: fn(&RemoteProviderConfig) -> Result<Arc<dyn RemoteFactoryProvider>, String>,
}

#[linkme::distributed_slice]
pub static REMOTE_FACTORY_PROVIDERS: [RemoteFactoryProviderEntry] = [..];

/// Instantiate every registered remote factory provider, sorted by name
///
/// # Returns
/// * `Ok(providers)` - One instance per registry entry
/// * `Err(String)` - Message naming the provider whose factory failed
pub fn resolve_remote_factory_providers(
    config: &RemoteProviderConfig,
) -> Result<Vec<Arc<dyn RemoteFactoryProvider>>, String> {
    let mut entries: Vec<&RemoteFactoryProviderEntry> = REMOTE_FACTORY_PROVIDERS.iter().collect();
    entries.sort_by_key(|entry| entry.name);
    entries
        .into_iter()
        .map(|entry| {
            (entry.factory)(config)
                .map_err(|e| format!("Remote factory provider '{}' failed: {e}", entry.name))
        })
        .collect()
}

/// List all registered remote factory providers as (name, description)
pub fn list_remote_factory_providers() -> Vec<(&'static str, &'static str)> {
    let mut providers: Vec<(&'static str, &'static str)> = REMOTE_FACTORY_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    providers.sort_unstable();
    providers
}
