//! Unit tests for the table-dispatched remote proxy

use async_trait::async_trait;
use rivet_domain::Result;
use rivet_domain::ports::{PropertyProvider, RemoteCall, RemoteProxy, RemoteTransport};
use rivet_domain::value_objects::RemoteUrl;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<RemoteCall>>,
}

#[async_trait]
impl RemoteTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn invoke(&self, call: RemoteCall) -> Result<Value> {
        let sum: i64 = call.arguments.iter().filter_map(Value::as_i64).sum();
        self.calls.lock().unwrap().push(call);
        Ok(json!(sum))
    }
}

/// Returns a fresh counter value on every invocation
#[derive(Default)]
struct CountingProperties {
    counter: AtomicUsize,
}

impl PropertyProvider for CountingProperties {
    fn properties(&self) -> BTreeMap<String, String> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        BTreeMap::from([("x-request".to_string(), n.to_string())])
    }
}

fn proxy(transport: Arc<RecordingTransport>, properties: Arc<CountingProperties>) -> RemoteProxy {
    RemoteProxy::new(
        "Calculator",
        RemoteUrl::parse("http://calc.local/api").unwrap(),
        transport,
        vec![properties],
    )
}

#[tokio::test]
async fn test_call_forwards_method_identity_and_arguments() {
    let transport = Arc::new(RecordingTransport::default());
    let proxy = proxy(Arc::clone(&transport), Arc::new(CountingProperties::default()));

    let sum: i64 = proxy.call("add", vec![json!(2), json!(3)]).await.unwrap();

    assert_eq!(sum, 5);
    let calls = transport.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].interface, "Calculator");
    assert_eq!(calls[0].method, "add");
    assert_eq!(calls[0].url.as_str(), "http://calc.local/api");
}

#[tokio::test]
async fn test_properties_are_collected_per_invocation() {
    let transport = Arc::new(RecordingTransport::default());
    let properties = Arc::new(CountingProperties::default());
    let proxy = proxy(Arc::clone(&transport), Arc::clone(&properties));

    // Creating the proxy does not consult providers
    assert_eq!(properties.counter.load(Ordering::SeqCst), 0);

    proxy.invoke("ping", Vec::new()).await.unwrap();
    proxy.invoke("ping", Vec::new()).await.unwrap();

    let calls = transport.calls.lock().unwrap();
    assert_eq!(calls[0].properties.get("x-request").map(String::as_str), Some("0"));
    assert_eq!(calls[1].properties.get("x-request").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_result_type_mismatch_is_a_remote_error() {
    let transport = Arc::new(RecordingTransport::default());
    let proxy = proxy(transport, Arc::new(CountingProperties::default()));

    let result: Result<String> = proxy.call("add", vec![json!(1)]).await;
    assert!(matches!(result, Err(rivet_domain::Error::Remote { .. })));
}

#[test]
fn test_debug_hides_transport_internals() {
    let proxy = proxy(
        Arc::new(RecordingTransport::default()),
        Arc::new(CountingProperties::default()),
    );
    let debug = format!("{proxy:?}");
    assert!(debug.contains("Calculator"));
    assert!(debug.contains("recording"));
    assert_eq!(proxy.transport_name(), "recording");
}
