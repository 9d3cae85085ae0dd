//! HTTP Remote Factory Provider
//!
//! Carries remote calls as JSON over HTTP:
//!
//! ```text
//! POST {url}/{interface}/{method}
//! content-type: application/json
//! <one header per property collected at call time>
//!
//! {"arguments": [arg0, arg1, ...]}
//! ```
//!
//! The reply is `{"result": value}` or `{"error": "message"}`, an empty
//! body meaning `null`; any non-2xx status is a remote error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request};
use serde_json::{Value, json};
use tracing::debug;

use rivet_application::ports::registry::{
    REMOTE_FACTORY_PROVIDERS, RemoteFactoryProviderEntry, RemoteProviderConfig,
};
use rivet_domain::error::{Error, Result};
use rivet_domain::ports::{
    PropertyProvider, RemoteCall, RemoteFactory, RemoteFactoryProvider, RemoteProxy,
    RemoteTransport,
};
use rivet_domain::value_objects::RemoteUrl;

use crate::constants::{ARGUMENTS_FIELD, CONTENT_TYPE_JSON, HTTP_PROTOCOLS};
use crate::utils::HttpResponseUtils;

/// Transport posting [`RemoteCall`]s to HTTP endpoints
///
/// Receives its HTTP client via constructor injection; one client (and
/// its connection pool) is shared by every proxy the factory creates.
pub struct HttpRemoteTransport {
    http_client: Client,
}

impl HttpRemoteTransport {
    /// Create a transport over an existing client
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Endpoint a call is posted to
    pub fn endpoint(call: &RemoteCall) -> String {
        call.url.join(&[&call.interface, &call.method])
    }

    /// Build the HTTP request for a call without sending it
    pub fn build_request(&self, call: &RemoteCall) -> Result<Request> {
        let endpoint = Self::endpoint(call);
        let mut request = self
            .http_client
            .post(&endpoint)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .json(&json!({ ARGUMENTS_FIELD: call.arguments }));
        for (name, value) in &call.properties {
            request = request.header(name.as_str(), value.as_str());
        }
        request
            .build()
            .map_err(|e| Error::remote_with_source(format!("Invalid request for {endpoint}"), e))
    }
}

#[async_trait]
impl RemoteTransport for HttpRemoteTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn invoke(&self, call: RemoteCall) -> Result<Value> {
        let request = self.build_request(&call)?;
        let endpoint = request.url().to_string();
        debug!(endpoint = %endpoint, arguments = call.arguments.len(), "Invoking remote method");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::remote_with_source(format!("{endpoint} timed out"), e)
                } else {
                    Error::remote_with_source(format!("{endpoint} unreachable"), e)
                }
            })?;

        HttpResponseUtils::check_and_parse(response, &endpoint).await
    }
}

/// Remote factory creating proxies over [`HttpRemoteTransport`]
pub struct HttpRemoteFactory {
    transport: Arc<HttpRemoteTransport>,
}

impl HttpRemoteFactory {
    /// Create a factory sharing one transport
    pub fn new(transport: Arc<HttpRemoteTransport>) -> Self {
        Self { transport }
    }
}

impl RemoteFactory for HttpRemoteFactory {
    fn name(&self) -> &str {
        "http"
    }

    fn create_proxy(
        &self,
        interface: &str,
        url: &RemoteUrl,
        property_providers: Vec<Arc<dyn PropertyProvider>>,
    ) -> Result<RemoteProxy> {
        if !HTTP_PROTOCOLS.contains(&url.protocol().as_str()) {
            return Err(Error::unsupported_protocol(url.protocol().as_str()));
        }
        Ok(RemoteProxy::new(
            interface,
            url.clone(),
            Arc::clone(&self.transport) as Arc<dyn RemoteTransport>,
            property_providers,
        ))
    }
}

/// Remote factory provider for `http` and `https`
pub struct HttpRemoteFactoryProvider {
    factory: Arc<HttpRemoteFactory>,
}

impl HttpRemoteFactoryProvider {
    /// Create the provider with a client built from `config`
    ///
    /// # Arguments
    /// * `config` - Timeouts and user agent for the shared HTTP client
    pub fn new(config: &RemoteProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::configuration_with_source("Failed to create HTTP client", e))?;
        Ok(Self::with_client(http_client))
    }

    /// Create the provider over an existing client
    pub fn with_client(http_client: Client) -> Self {
        let transport = Arc::new(HttpRemoteTransport::new(http_client));
        Self {
            factory: Arc::new(HttpRemoteFactory::new(transport)),
        }
    }
}

impl RemoteFactoryProvider for HttpRemoteFactoryProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn protocols(&self) -> Vec<String> {
        HTTP_PROTOCOLS.iter().map(ToString::to_string).collect()
    }

    fn remote_factory(&self) -> Arc<dyn RemoteFactory> {
        Arc::clone(&self.factory) as Arc<dyn RemoteFactory>
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating HTTP remote factory provider instances.
fn http_factory(
    config: &RemoteProviderConfig,
) -> std::result::Result<Arc<dyn RemoteFactoryProvider>, String> {
    HttpRemoteFactoryProvider::new(config)
        .map(|provider| Arc::new(provider) as Arc<dyn RemoteFactoryProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(REMOTE_FACTORY_PROVIDERS)]
static HTTP_PROVIDER: RemoteFactoryProviderEntry = RemoteFactoryProviderEntry {
    name: "http",
    description: "JSON over HTTP remote invocation (http, https)",
    factory: http_factory,
};
