//! Unit tests for outbound server-sent events

use rivet_domain::value_objects::{EventBuilder, OutboundEvent};
use serde_json::json;
use std::time::Duration;

#[test]
fn test_full_event_wire_format() {
    let event = OutboundEvent::builder()
        .comment("heartbeat")
        .id("42")
        .name("price")
        .reconnect_delay(Duration::from_secs(3))
        .data("line one\nline two")
        .build()
        .unwrap();

    assert_eq!(
        event.to_wire(),
        ": heartbeat\nid: 42\nevent: price\nretry: 3000\ndata: line one\ndata: line two\n\n"
    );
}

#[test]
fn test_comment_only_event() {
    let event = EventBuilder::default().comment("keep-alive").build().unwrap();
    assert_eq!(event.data(), None);
    assert_eq!(event.to_wire(), ": keep-alive\n\n");
}

#[test]
fn test_json_payload() {
    let event = OutboundEvent::builder()
        .name("order")
        .json_data(&json!({"id": 7}))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(event.data(), Some(r#"{"id":7}"#));
}

#[test]
fn test_event_without_payload_is_rejected() {
    assert!(OutboundEvent::builder().id("1").build().is_err());
}

#[test]
fn test_multiline_name_is_rejected() {
    let result = OutboundEvent::builder().name("a\nb").data("x").build();
    assert!(result.is_err());
}

#[test]
fn test_builder_has_no_side_effects() {
    let builder = OutboundEvent::builder().data("same");
    let first = builder.clone().build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first, second);
}
