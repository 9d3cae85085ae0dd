//! Application bootstrap
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = Bootstrap::new(AppConfig::default())?
//!     .module(OrdersModule)
//!     .class(
//!         ClassMetadata::component::<dyn Orders, _>("OrderService", |_| Ok(Arc::new(OrderService)))
//!             .annotate(Annotation::new(REMOTE_MARKER)),
//!     )
//!     .build()?;
//!
//! let orders = context.container().get_instance::<dyn Orders>()?;
//! let endpoints = context.rmi_endpoints().names();
//! ```

use crate::config::AppConfig;
use crate::di::modules::InfrastructureModule;
use rivet_application::ports::registry::resolve_remote_factory_providers;
use rivet_application::{ClassMetadata, Connector, Container, ContainerBuilder, Module};
use rivet_domain::error::{Error, Result};
use rivet_domain::ports::RemoteFactoryProvider;
use rivet_providers::connectors::{RestResourceTable, RmiEndpointTable};
use rivet_providers::{RemoteClientConnector, RestConnector, RmiConnector, Sse, SseBroadcaster};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Collects modules, classes and connectors on top of the default wiring
pub struct Bootstrap {
    config: Arc<AppConfig>,
    properties: Vec<(String, String)>,
    modules: Vec<Arc<dyn Module>>,
    connectors: Vec<Arc<dyn Connector>>,
    providers: Vec<Arc<dyn RemoteFactoryProvider>>,
    classes: Vec<ClassMetadata>,
    rmi_endpoints: Arc<RmiEndpointTable>,
    rest_resources: Arc<RestResourceTable>,
}

impl Bootstrap {
    /// Default wiring for `config`
    ///
    /// # Errors
    ///
    /// Fails when a registered remote factory provider cannot be created.
    pub fn new(config: AppConfig) -> Result<Self> {
        let config = Arc::new(config);
        let providers = resolve_remote_factory_providers(&config.remote.provider_config())
            .map_err(Error::configuration)?;

        let rmi = RmiConnector::new();
        let rest = RestConnector::new();
        let rmi_endpoints = Arc::clone(rmi.endpoints());
        let rest_resources = Arc::clone(rest.resources());

        let connectors: Vec<Arc<dyn Connector>> = vec![
            Arc::new(rmi),
            Arc::new(rest),
            Arc::new(RemoteClientConnector::new()),
        ];
        let modules: Vec<Arc<dyn Module>> =
            vec![Arc::new(InfrastructureModule::new(Arc::clone(&config)))];

        Ok(Self {
            config,
            properties: Vec::new(),
            modules,
            connectors,
            providers,
            classes: Vec::new(),
            rmi_endpoints,
            rest_resources,
        })
    }

    /// Set a container property
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Add an application module after the infrastructure module
    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    /// Append a connector after the default chain
    pub fn connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connectors.push(Arc::new(connector));
        self
    }

    /// Insert a connector ahead of the default chain
    pub fn connector_first(mut self, connector: impl Connector + 'static) -> Self {
        self.connectors.insert(0, Arc::new(connector));
        self
    }

    /// Register a remote factory provider besides the linkme-registered ones
    pub fn remote_factory_provider(mut self, provider: Arc<dyn RemoteFactoryProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Add a scanned managed class
    pub fn class(mut self, class: ClassMetadata) -> Self {
        self.classes.push(class);
        self
    }

    /// Assemble the container
    pub fn build(self) -> Result<AppContext> {
        let mut builder = ContainerBuilder::new()
            .collision_policy(self.config.container.protocol_collision)
            .eager_singletons(self.config.container.eager_singletons)
            .remote_factory_providers(self.providers);
        for (key, value) in self.properties {
            builder = builder.property(key, value);
        }
        for module in self.modules {
            builder = builder.module_arc(module);
        }
        for connector in self.connectors {
            builder = builder.connector_arc(connector);
        }
        for class in self.classes {
            builder = builder.class(class);
        }

        let container = builder.build()?;
        let sse = container.get_instance::<Sse>()?;
        let broadcaster = container.get_instance::<SseBroadcaster>()?;

        let protocols: Vec<&str> = container
            .remote_factories()
            .protocols()
            .map(|p| p.as_str())
            .collect();
        info!(
            protocols = ?protocols,
            rmi_endpoints = self.rmi_endpoints.len(),
            rest_resources = self.rest_resources.len(),
            "Application context ready"
        );

        Ok(AppContext {
            config: self.config,
            container,
            rmi_endpoints: self.rmi_endpoints,
            rest_resources: self.rest_resources,
            sse,
            broadcaster,
        })
    }
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("modules", &self.modules.iter().map(|m| m.name()).collect::<Vec<_>>())
            .field(
                "connectors",
                &self.connectors.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

/// Assembled application: container plus the transport tables it filled
pub struct AppContext {
    config: Arc<AppConfig>,
    container: Container,
    rmi_endpoints: Arc<RmiEndpointTable>,
    rest_resources: Arc<RestResourceTable>,
    sse: Arc<Sse>,
    broadcaster: Arc<SseBroadcaster>,
}

impl AppContext {
    /// Loaded configuration
    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    /// Assembled container
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Remote endpoints published by the RMI connector
    pub fn rmi_endpoints(&self) -> &Arc<RmiEndpointTable> {
        &self.rmi_endpoints
    }

    /// Resources published by the REST connector
    pub fn rest_resources(&self) -> &Arc<RestResourceTable> {
        &self.rest_resources
    }

    /// SSE entry point
    pub fn sse(&self) -> &Arc<Sse> {
        &self.sse
    }

    /// Shared broadcaster
    pub fn broadcaster(&self) -> &Arc<SseBroadcaster> {
        &self.broadcaster
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("container", &self.container)
            .field("rmi_endpoints", &self.rmi_endpoints.len())
            .field("rest_resources", &self.rest_resources.len())
            .finish_non_exhaustive()
    }
}

/// Assemble the default application context for `config`
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    Bootstrap::new(config)?.build()
}
