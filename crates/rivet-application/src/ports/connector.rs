//! Connector port

use crate::binding::Binder;
use crate::descriptor::ManagedClass;
use rivet_domain::error::Result;

/// Pluggable transport unit deciding which managed classes it owns
///
/// The container offers every managed class to every connector in
/// registration order; the first connector returning `true` from
/// [`bind`](Connector::bind) owns the class and no later connector sees
/// it. Unclaimed classes become plain injectable components.
pub trait Connector: Send + Sync {
    /// Connector name, reported as the owner of claimed classes
    fn name(&self) -> &str;

    /// One-time setup before any class is offered (e.g. bind a shared service)
    fn configure(&self, _binder: &mut Binder<'_>) -> Result<()> {
        Ok(())
    }

    /// Decide whether to claim `class`; on claim, contribute its bindings
    fn bind(&self, class: &ManagedClass, binder: &mut Binder<'_>) -> Result<bool>;
}
