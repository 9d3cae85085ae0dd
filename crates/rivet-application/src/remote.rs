//! Remote Factory Registry
//!
//! Protocol-indexed view over the registered [`RemoteFactoryProvider`]s,
//! built once during container assembly and passed by reference to every
//! component that needs remote proxies.
//!
//! ```text
//! providers ──► protocols() ──► { "http" → HttpRemoteFactory, "ws" → ... }
//!                                          │
//! get_remote_instance(Iface, "ws://h/x") ──┘──► RemoteProxy ──► Iface adapter
//! ```

use rivet_domain::error::{Error, Result};
use rivet_domain::ports::{PropertyProvider, RemoteFactory, RemoteFactoryProvider, RemoteInterface, RemoteProxy};
use rivet_domain::value_objects::{Protocol, RemoteUrl};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What to do when two providers declare the same protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Reject the registry; assembly aborts
    #[default]
    Fail,
    /// Keep the first provider and log the collision
    FirstWins,
}

struct FactoryEntry {
    provider: String,
    factory: Arc<dyn RemoteFactory>,
}

/// Protocol → remote factory map
#[derive(Default)]
pub struct RemoteFactoryRegistry {
    factories: BTreeMap<Protocol, FactoryEntry>,
}

impl RemoteFactoryRegistry {
    /// Registry without any protocol
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the map from providers in registration order
    pub fn from_providers(
        providers: &[Arc<dyn RemoteFactoryProvider>],
        policy: CollisionPolicy,
    ) -> Result<Self> {
        let mut factories: BTreeMap<Protocol, FactoryEntry> = BTreeMap::new();
        for provider in providers {
            let factory = provider.remote_factory();
            // A provider may list one protocol under several spellings
            let protocols = provider
                .protocols()
                .iter()
                .map(|token| Protocol::parse(token))
                .collect::<Result<BTreeSet<Protocol>>>()
                .map_err(|e| Error::configuration(format!("Provider '{}': {e}", provider.name())))?;
            for protocol in protocols {
                if let Some(existing) = factories.get(&protocol) {
                    match policy {
                        CollisionPolicy::Fail => {
                            return Err(Error::protocol_collision(
                                protocol.as_str(),
                                existing.provider.as_str(),
                                provider.name(),
                            ));
                        }
                        CollisionPolicy::FirstWins => {
                            warn!(
                                protocol = %protocol,
                                kept = %existing.provider,
                                ignored = %provider.name(),
                                "Protocol declared twice, keeping first provider"
                            );
                            continue;
                        }
                    }
                }
                debug!(protocol = %protocol, provider = %provider.name(), "Remote protocol registered");
                factories.insert(
                    protocol,
                    FactoryEntry {
                        provider: provider.name().to_string(),
                        factory: Arc::clone(&factory),
                    },
                );
            }
        }
        info!(protocols = factories.len(), "Remote factory registry built");
        Ok(Self { factories })
    }

    /// Registered protocols, sorted
    pub fn protocols(&self) -> impl Iterator<Item = &Protocol> {
        self.factories.keys()
    }

    /// Name of the provider serving a protocol
    pub fn provider_of(&self, protocol: &str) -> Option<&str> {
        let protocol = Protocol::parse(protocol).ok()?;
        self.factories.get(&protocol).map(|e| e.provider.as_str())
    }

    /// Factory serving the URL's protocol
    pub fn factory_for(&self, url: &RemoteUrl) -> Result<Arc<dyn RemoteFactory>> {
        self.factories
            .get(url.protocol())
            .map(|entry| Arc::clone(&entry.factory))
            .ok_or_else(|| Error::unsupported_protocol(url.protocol().as_str()))
    }

    /// Whether the URL's protocol has a factory
    pub fn supports(&self, url: &RemoteUrl) -> bool {
        self.factories.contains_key(url.protocol())
    }

    /// Create a raw proxy for `interface` at `url`
    pub fn create_proxy(
        &self,
        interface: &str,
        url: &str,
        property_providers: Vec<Arc<dyn PropertyProvider>>,
    ) -> Result<RemoteProxy> {
        let url = RemoteUrl::parse(url)?;
        let factory = self.factory_for(&url)?;
        debug!(interface, url = %url, factory = factory.name(), "Creating remote proxy");
        factory.create_proxy(interface, &url, property_providers)
    }

    /// Create a typed client for the remote interface adapted by `C`
    pub fn get_remote_instance<C: RemoteInterface>(
        &self,
        url: &str,
        property_providers: Vec<Arc<dyn PropertyProvider>>,
    ) -> Result<Arc<C::Interface>> {
        let proxy = self.create_proxy(C::NAME, url, property_providers)?;
        Ok(C::from_proxy(proxy).into_interface())
    }

    /// Number of registered protocols
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no protocol is registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for RemoteFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.factories.iter().map(|(p, e)| (p.as_str(), e.provider.as_str())))
            .finish()
    }
}
