//! Infrastructure module
//!
//! Binds the loaded configuration and the SSE services.

use crate::config::AppConfig;
use rivet_application::{Binder, Module, Resolver};
use rivet_domain::error::Result;
use rivet_providers::{Sse, SseBroadcaster};
use std::sync::Arc;

/// Module binding `AppConfig`, `Sse` and a shared `SseBroadcaster`
#[derive(Debug, Clone)]
pub struct InfrastructureModule {
    config: Arc<AppConfig>,
}

impl InfrastructureModule {
    /// Module for the given configuration
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

impl Module for InfrastructureModule {
    fn name(&self) -> &str {
        "infrastructure"
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder
            .bind::<AppConfig>()
            .to_instance(Arc::clone(&self.config))?;

        let options = self.config.sse.options();
        binder
            .bind::<Sse>()
            .singleton()
            .to_provider(move |_: &Resolver<'_>| Ok(Arc::new(Sse::new(options))))?;

        binder
            .bind::<SseBroadcaster>()
            .singleton()
            .to_provider(|resolver: &Resolver<'_>| Ok(Arc::new(resolver.get::<Sse>()?.new_broadcaster())))?;

        Ok(())
    }
}
