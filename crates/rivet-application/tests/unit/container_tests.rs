//! Unit tests for assembly and the connector claim chain

use crate::fakes::{Echo, EchoClient, FakeProvider};
use rivet_application::{
    Binder, CapabilityAdapter, ClassMetadata, Connector, Container, ContainerBuilder,
    ManagedClass, MethodMetadata,
};
use rivet_domain::Error;
use rivet_domain::constants::{LEGACY_REMOTE_MARKER, PATH_MARKER, REMOTE_MARKER, SCOPE_MARKER};
use rivet_domain::error::Result;
use rivet_domain::value_objects::{Annotation, Capability, Scope};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Claims every class carrying one capability
struct CapabilityConnector {
    name: &'static str,
    capability: Capability,
    configured: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl CapabilityConnector {
    fn new(name: &'static str, capability: Capability) -> Self {
        Self {
            name,
            capability,
            configured: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Connector for CapabilityConnector {
    fn name(&self) -> &str {
        self.name
    }

    fn configure(&self, _binder: &mut Binder<'_>) -> Result<()> {
        self.configured.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn bind(&self, class: &ManagedClass, binder: &mut Binder<'_>) -> Result<bool> {
        self.seen.lock().unwrap().push(class.name().to_string());
        if !class.has_capability(&self.capability) {
            return Ok(false);
        }
        binder.bind_class(class)?;
        Ok(true)
    }
}

trait Calculator: Send + Sync {
    fn add(&self, a: i64, b: i64) -> i64;
}

struct LocalCalculator;

impl Calculator for LocalCalculator {
    fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }
}

fn calculator(name: &str) -> ClassMetadata {
    ClassMetadata::component::<dyn Calculator, _>(name, |_| Ok(Arc::new(LocalCalculator)))
}

fn remote_and_path() -> ClassMetadata {
    calculator("Both")
        .annotate(Annotation::new(REMOTE_MARKER))
        .annotate(Annotation::with_value(PATH_MARKER, "/calc"))
}

#[test]
fn test_first_registered_connector_claims_overlapping_class() {
    for _ in 0..10 {
        let rmi_first = Container::builder()
            .connector(CapabilityConnector::new("rmi", Capability::REMOTE))
            .connector(CapabilityConnector::new("rest", Capability::PATH))
            .class(remote_and_path())
            .build()
            .unwrap();
        assert_eq!(rmi_first.owner_of("Both"), Some("rmi"));

        let rest_first = Container::builder()
            .connector(CapabilityConnector::new("rest", Capability::PATH))
            .connector(CapabilityConnector::new("rmi", Capability::REMOTE))
            .class(remote_and_path())
            .build()
            .unwrap();
        assert_eq!(rest_first.owner_of("Both"), Some("rest"));
    }
}

#[test]
fn test_claimed_class_is_not_offered_to_later_connectors() {
    let second = CapabilityConnector::new("second", Capability::PATH);
    let seen = Arc::clone(&second.seen);

    Container::builder()
        .connector(CapabilityConnector::new("first", Capability::REMOTE))
        .connector(second)
        .class(remote_and_path())
        .class(calculator("Plain").qualified("plain"))
        .build()
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["Plain".to_string()]);
}

#[test]
fn test_legacy_marker_is_claimed_like_current_marker() {
    let container = Container::builder()
        .connector(CapabilityConnector::new("rmi", Capability::REMOTE))
        .class(calculator("Legacy").annotate(Annotation::new(LEGACY_REMOTE_MARKER)))
        .build()
        .unwrap();

    assert_eq!(container.owner_of("Legacy"), Some("rmi"));
}

#[test]
fn test_unclaimed_class_becomes_plain_component() {
    let container = Container::builder()
        .connector(CapabilityConnector::new("rmi", Capability::REMOTE))
        .class(calculator("Plain").scope(Scope::Singleton))
        .build()
        .unwrap();

    assert_eq!(container.owner_of("Plain"), None);
    let first = container.get_instance::<dyn Calculator>().unwrap();
    let second = container.get_instance::<dyn Calculator>().unwrap();
    assert_eq!(first.add(2, 2), 4);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_connectors_configured_once_before_claims() {
    let connector = CapabilityConnector::new("rmi", Capability::REMOTE);
    let configured = Arc::clone(&connector.configured);

    Container::builder()
        .connector(connector)
        .class(calculator("A").qualified("a"))
        .class(calculator("B").qualified("b"))
        .build()
        .unwrap();

    assert_eq!(configured.load(Ordering::SeqCst), 1);
}

#[test]
fn test_descriptors_precompute_capabilities() {
    let container = Container::builder()
        .class(
            remote_and_path().method(
                MethodMetadata::new("add").annotate(Annotation::with_value(PATH_MARKER, "/add")),
            ),
        )
        .build()
        .unwrap();

    let descriptor = container.descriptor("Both").unwrap();
    let capabilities: Vec<&Capability> = descriptor.capabilities().collect();
    assert!(capabilities.contains(&&Capability::REMOTE));
    assert!(capabilities.contains(&&Capability::PATH));
    assert_eq!(descriptor.path(), Some("/calc"));
    assert_eq!(descriptor.methods()[0].path(), Some("/add"));
    assert_eq!(container.descriptors().len(), 1);
}

#[test]
fn test_invalid_class_scope_aborts_assembly() {
    let result = Container::builder()
        .class(calculator("Odd").annotate(Annotation::with_value(SCOPE_MARKER, "forever")))
        .build();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_two_plain_classes_for_same_key_collide() {
    let result = Container::builder()
        .class(calculator("One"))
        .class(calculator("Two"))
        .build();
    assert!(matches!(result, Err(Error::DuplicateBinding { .. })));
}

#[test]
fn test_custom_marker_through_adapter() {
    let audited = Capability::custom("audited");
    let container = ContainerBuilder::new()
        .capability_adapter(CapabilityAdapter::default().with_marker("acme::Audited", audited.clone()))
        .connector(CapabilityConnector::new("audit", audited))
        .class(calculator("Audited").annotate(Annotation::new("acme::Audited")))
        .build()
        .unwrap();

    assert_eq!(container.owner_of("Audited"), Some("audit"));
}

#[tokio::test]
async fn test_remote_client_class_resolves_through_registry() {
    let container = Container::builder()
        .remote_factory_provider(FakeProvider::shared("ws-provider", &["ws"]))
        .class(ClassMetadata::remote_client::<EchoClient>("ws://feed.local/echo").unwrap())
        .build()
        .unwrap();

    let echo = container.get_instance::<dyn Echo>().unwrap();
    assert_eq!(echo.transport(), "ws-provider");
    let reply = echo.echo("ping").await.unwrap();
    assert_eq!(reply["arguments"][0], "ping");

    let descriptor = container.descriptor("Echo").unwrap();
    assert!(descriptor.has_capability(&Capability::REMOTE_CLIENT));
}

#[test]
fn test_protocol_collision_aborts_assembly() {
    let result = Container::builder()
        .remote_factory_provider(FakeProvider::shared("a", &["http"]))
        .remote_factory_provider(FakeProvider::shared("b", &["http"]))
        .build();
    assert!(matches!(result, Err(Error::ProtocolCollision { .. })));
}

#[test]
fn test_connector_error_aborts_assembly() {
    struct Rejecting;

    impl Connector for Rejecting {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn bind(&self, class: &ManagedClass, _binder: &mut Binder<'_>) -> Result<bool> {
            Err(Error::configuration(format!("{} is not allowed", class.name())))
        }
    }

    let result = Container::builder()
        .connector(Rejecting)
        .class(calculator("Any"))
        .build();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}
