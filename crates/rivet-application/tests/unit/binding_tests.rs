//! Unit tests for modules, the binder and binding uniqueness

use rivet_application::{Binder, Container, Injectable, Module, Resolver, module_bindings};
use rivet_domain::Error;
use rivet_domain::error::Result;
use rivet_domain::value_objects::{BindingKey, Scope};
use std::sync::Arc;

trait Alpha: Send + Sync {}
trait Beta: Send + Sync {
    fn label(&self) -> &str;
}
trait Gamma: Send + Sync {}

struct AlphaImpl;
impl Alpha for AlphaImpl {}

struct BetaImpl;
impl Beta for BetaImpl {
    fn label(&self) -> &str {
        "beta"
    }
}

struct GammaImpl;
impl Gamma for GammaImpl {}

/// Declares bindings for Alpha, Beta and Gamma
struct AbcModule;

impl Module for AbcModule {
    fn name(&self) -> &str {
        "abc"
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder.bind::<dyn Alpha>().to_provider(|_| Ok(Arc::new(AlphaImpl)))?;
        binder.bind::<dyn Beta>().to_provider(|_| Ok(Arc::new(BetaImpl)))?;
        binder
            .bind::<dyn Gamma>()
            .singleton()
            .to_provider(|_| Ok(Arc::new(GammaImpl)))
    }
}

/// Binds Beta a second time
struct ConflictingModule;

impl Module for ConflictingModule {
    fn name(&self) -> &str {
        "conflicting"
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder
            .bind::<dyn Beta>()
            .singleton()
            .to_provider(|_| Ok(Arc::new(BetaImpl)))
    }
}

#[test]
fn test_module_bindings_are_ordered() {
    let bindings = module_bindings(&AbcModule).unwrap();
    let keys: Vec<&BindingKey> = bindings.iter().map(|b| b.key()).collect();

    assert_eq!(
        keys,
        vec![
            &BindingKey::of::<dyn Alpha>(),
            &BindingKey::of::<dyn Beta>(),
            &BindingKey::of::<dyn Gamma>(),
        ]
    );
    assert_eq!(bindings[2].scope(), Scope::Singleton);
    assert!(bindings.iter().all(|b| b.source() == "abc"));
}

#[test]
fn test_round_trip_instance_scope_returns_distinct_objects() {
    let container = Container::builder().module(AbcModule).build().unwrap();

    let first = container.get_instance::<dyn Beta>().unwrap();
    let second = container.get_instance::<dyn Beta>().unwrap();

    assert_eq!(first.label(), "beta");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_duplicate_binding_across_modules_fails_assembly() {
    let result = Container::builder()
        .module(AbcModule)
        .module(ConflictingModule)
        .build();

    match result {
        Err(Error::DuplicateBinding { key }) => {
            assert!(key.contains("'abc'"));
            assert!(key.contains("'conflicting'"));
        }
        other => panic!("Expected DuplicateBinding, got {other:?}"),
    }
}

#[test]
fn test_duplicate_binding_within_module_fails() {
    struct Twice;

    impl Module for Twice {
        fn name(&self) -> &str {
            "twice"
        }

        fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
            binder.bind::<dyn Alpha>().to_provider(|_| Ok(Arc::new(AlphaImpl)))?;
            binder.bind::<dyn Alpha>().to_provider(|_| Ok(Arc::new(AlphaImpl)))
        }
    }

    let error = module_bindings(&Twice).unwrap_err();
    assert!(matches!(error, Error::DuplicateBinding { .. }));
    assert!(error.is_configuration());
}

#[test]
fn test_qualified_bindings_coexist() {
    struct Named;

    impl Module for Named {
        fn name(&self) -> &str {
            "named"
        }

        fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
            binder.bind::<dyn Alpha>().to_provider(|_| Ok(Arc::new(AlphaImpl)))?;
            binder
                .bind::<dyn Alpha>()
                .named("secondary")
                .to_provider(|_| Ok(Arc::new(AlphaImpl)))
        }
    }

    let container = Container::builder().module(Named).build().unwrap();
    assert!(container.get_instance::<dyn Alpha>().is_ok());
    assert!(container.get_named::<dyn Alpha>("secondary").is_ok());
    assert!(matches!(
        container.get_named::<dyn Alpha>("tertiary"),
        Err(Error::BindingNotFound { .. })
    ));
}

#[test]
fn test_conditional_binding_consults_earlier_modules() {
    /// Binds a fallback Alpha only when nothing else did
    struct Fallback;

    impl Module for Fallback {
        fn name(&self) -> &str {
            "fallback"
        }

        fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
            if binder.is_bound::<dyn Alpha>() {
                return Ok(());
            }
            binder.bind::<dyn Alpha>().to_provider(|_| Ok(Arc::new(AlphaImpl)))
        }
    }

    // Fallback after AbcModule must not collide
    let container = Container::builder()
        .module(AbcModule)
        .module(Fallback)
        .build()
        .unwrap();
    assert_eq!(
        container.injector().binding(&BindingKey::of::<dyn Alpha>()).unwrap().source(),
        "abc"
    );

    let alone = Container::builder().module(Fallback).build().unwrap();
    assert!(alone.get_instance::<dyn Alpha>().is_ok());
}

#[test]
fn test_module_reads_container_properties() {
    struct Configured;

    impl Module for Configured {
        fn name(&self) -> &str {
            "configured"
        }

        fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
            let greeting = binder.property("greeting").unwrap_or("hello").to_string();
            binder.bind::<String>().to_instance(Arc::new(greeting))
        }
    }

    let container = Container::builder()
        .property("greeting", "bonjour")
        .module(Configured)
        .build()
        .unwrap();
    assert_eq!(container.get_instance::<String>().unwrap().as_str(), "bonjour");
}

#[test]
fn test_injectable_to_self_resolves_dependencies() {
    struct Service {
        beta: Arc<dyn Beta>,
    }

    impl Injectable for Service {
        fn inject(resolver: &Resolver<'_>) -> Result<Self> {
            Ok(Self {
                beta: resolver.get::<dyn Beta>()?,
            })
        }
    }

    struct ServiceModule;

    impl Module for ServiceModule {
        fn name(&self) -> &str {
            "service"
        }

        fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
            binder.install(&AbcModule)?;
            binder.bind::<Service>().to_self()
        }
    }

    let container = Container::builder().module(ServiceModule).build().unwrap();
    let service = container.get_instance::<Service>().unwrap();
    assert_eq!(service.beta.label(), "beta");
    assert_eq!(
        container.injector().binding(&BindingKey::of::<dyn Alpha>()).unwrap().source(),
        "abc"
    );
}
