//! Module port

use crate::binding::Binder;
use rivet_domain::error::Result;

/// A unit of configuration contributing bindings
///
/// Modules are configured once, in registration order, when the container
/// is assembled. A module may consult the binder to see what earlier
/// modules bound and declare conditional bindings accordingly.
///
/// ```ignore
/// struct GreetingModule;
///
/// impl Module for GreetingModule {
///     fn name(&self) -> &str {
///         "greeting"
///     }
///
///     fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
///         binder
///             .bind::<dyn Greeter>()
///             .singleton()
///             .to_provider(|_| Ok(Arc::new(English)))
///     }
/// }
/// ```
pub trait Module: Send + Sync {
    /// Module name, recorded as the source of its bindings
    fn name(&self) -> &str;

    /// Declare bindings
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()>;
}
