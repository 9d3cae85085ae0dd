//! Unit tests for domain value objects

use rivet_domain::constants::{REMOTE_MARKER, VALUE_ATTRIBUTE};
use rivet_domain::value_objects::{
    Annotation, BindingKey, Capability, Protocol, RemoteUrl, Scope,
};

trait Greeter {}

#[test]
fn test_binding_key_qualifier_distinguishes_keys() {
    let plain = BindingKey::of::<dyn Greeter>();
    let named = BindingKey::qualified::<dyn Greeter>("formal");

    assert_ne!(plain, named);
    assert_eq!(named, BindingKey::of::<dyn Greeter>().with_qualifier("formal"));
    assert_eq!(named.qualifier(), Some("formal"));
    assert!(named.to_string().ends_with("[formal]"));
}

#[test]
fn test_scope_aliases() {
    assert_eq!("singleton".parse::<Scope>().unwrap(), Scope::Singleton);
    assert_eq!("Thread".parse::<Scope>().unwrap(), Scope::Context);
    assert_eq!("service".parse::<Scope>().unwrap(), Scope::Context);
    assert_eq!("transient".parse::<Scope>().unwrap(), Scope::Instance);
    assert!("forever".parse::<Scope>().is_err());
    assert_eq!(Scope::default(), Scope::Instance);
    assert!(!Scope::Instance.is_cached());
}

#[test]
fn test_protocol_is_case_insensitive() {
    assert_eq!(Protocol::parse("HTTP").unwrap(), Protocol::parse("http").unwrap());
    assert!(Protocol::parse("1tcp").is_err());
    assert!(Protocol::parse("").is_err());
}

#[test]
fn test_remote_url_parts() {
    let url = RemoteUrl::parse("WS://host:9000/events/").unwrap();
    assert_eq!(url.protocol().as_str(), "ws");
    assert_eq!(url.address(), "host:9000/events");
    assert_eq!(url.join(&["Feed", "/next/"]), "WS://host:9000/events/Feed/next");
}

#[test]
fn test_remote_url_rejects_malformed_input() {
    assert!(RemoteUrl::parse("host/x").is_err());
    assert!(RemoteUrl::parse("http://").is_err());
    assert!(RemoteUrl::parse("9p://host").is_err());
}

#[test]
fn test_annotation_value() {
    let annotation = Annotation::with_value(REMOTE_MARKER, "calculator").attribute("version", "2");
    assert_eq!(annotation.value(), Some("calculator"));
    assert_eq!(annotation.get(VALUE_ATTRIBUTE), Some("calculator"));
    assert_eq!(annotation.get("version"), Some("2"));
    assert!(annotation.is_any(&["other", REMOTE_MARKER]));
}

#[test]
fn test_custom_capability() {
    let custom = Capability::custom("audited");
    assert_eq!(custom.as_str(), "audited");
    assert_ne!(custom, Capability::REMOTE);
}
