//! Remote invocation ports
//!
//! A [`RemoteFactory`] turns an interface name and a URL into a
//! [`RemoteProxy`]. The proxy is a table-dispatched adapter: user-written
//! client types implement [`RemoteInterface`] and forward each interface
//! method to [`RemoteProxy::invoke`] with the method name and arguments.
//!
//! ```ignore
//! struct CalculatorClient(RemoteProxy);
//!
//! #[async_trait]
//! impl Calculator for CalculatorClient {
//!     async fn add(&self, a: i64, b: i64) -> Result<i64> {
//!         self.0.call("add", vec![json!(a), json!(b)]).await
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::value_objects::RemoteUrl;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Per-invocation metadata source (headers, credentials, trace ids)
///
/// Consulted by the transport each time a method is invoked, never at
/// proxy creation time.
pub trait PropertyProvider: Send + Sync {
    /// Properties to attach to the next invocation
    fn properties(&self) -> BTreeMap<String, String>;
}

/// One method invocation handed to a transport
#[derive(Debug, Clone)]
pub struct RemoteCall {
    /// Remote interface name
    pub interface: String,
    /// Method name
    pub method: String,
    /// Positional arguments
    pub arguments: Vec<Value>,
    /// Target endpoint
    pub url: RemoteUrl,
    /// Properties collected from the proxy's property providers
    pub properties: BTreeMap<String, String>,
}

/// Marshals a [`RemoteCall`] to its endpoint and returns the result value
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Transport name for diagnostics
    fn name(&self) -> &str;

    /// Perform the call
    async fn invoke(&self, call: RemoteCall) -> Result<Value>;
}

/// Generic call forwarder implementing a remote interface
#[derive(Clone)]
pub struct RemoteProxy {
    interface: String,
    url: RemoteUrl,
    transport: Arc<dyn RemoteTransport>,
    property_providers: Vec<Arc<dyn PropertyProvider>>,
}

impl RemoteProxy {
    /// Create a proxy bound to an interface, endpoint and transport
    pub fn new(
        interface: impl Into<String>,
        url: RemoteUrl,
        transport: Arc<dyn RemoteTransport>,
        property_providers: Vec<Arc<dyn PropertyProvider>>,
    ) -> Self {
        Self {
            interface: interface.into(),
            url,
            transport,
            property_providers,
        }
    }

    /// Remote interface name
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Target endpoint
    pub fn url(&self) -> &RemoteUrl {
        &self.url
    }

    /// Name of the transport that carries calls
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Forward a method invocation and return the raw result
    pub async fn invoke(&self, method: &str, arguments: Vec<Value>) -> Result<Value> {
        let mut properties = BTreeMap::new();
        for provider in &self.property_providers {
            properties.extend(provider.properties());
        }
        let call = RemoteCall {
            interface: self.interface.clone(),
            method: method.to_string(),
            arguments,
            url: self.url.clone(),
            properties,
        };
        self.transport.invoke(call).await
    }

    /// Forward a method invocation and deserialize the result
    pub async fn call<R: DeserializeOwned>(&self, method: &str, arguments: Vec<Value>) -> Result<R> {
        let value = self.invoke(method, arguments).await?;
        serde_json::from_value(value).map_err(|e| {
            Error::remote_with_source(
                format!("Invalid result for {}::{method}", self.interface),
                e,
            )
        })
    }
}

impl fmt::Debug for RemoteProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProxy")
            .field("interface", &self.interface)
            .field("url", &self.url.as_str())
            .field("transport", &self.transport.name())
            .field("property_providers", &self.property_providers.len())
            .finish()
    }
}

/// Produces proxies for remote interfaces over one transport
pub trait RemoteFactory: Send + Sync {
    /// Factory name for diagnostics
    fn name(&self) -> &str;

    /// Create a proxy for `interface` at `url`
    fn create_proxy(
        &self,
        interface: &str,
        url: &RemoteUrl,
        property_providers: Vec<Arc<dyn PropertyProvider>>,
    ) -> Result<RemoteProxy>;
}

/// Supplies a [`RemoteFactory`] for a set of protocol tokens
pub trait RemoteFactoryProvider: Send + Sync {
    /// Provider name for diagnostics
    fn name(&self) -> &str;

    /// Protocol tokens handled by the factory (case-insensitive)
    fn protocols(&self) -> Vec<String>;

    /// The factory serving those protocols
    fn remote_factory(&self) -> Arc<dyn RemoteFactory>;
}

/// Client-side adapter for a remote interface
///
/// Implementors wrap a [`RemoteProxy`] and implement `Interface` by
/// forwarding to it.
pub trait RemoteInterface: Sized + Send + Sync + 'static {
    /// Interface implemented by the adapter (usually `dyn Trait`)
    type Interface: ?Sized + Send + Sync + 'static;

    /// Interface name sent on the wire
    const NAME: &'static str;

    /// Wrap a proxy
    fn from_proxy(proxy: RemoteProxy) -> Self;

    /// Upcast the adapter to its interface
    fn into_interface(self) -> Arc<Self::Interface>;
}
