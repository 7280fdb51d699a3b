//! Tests for the endpoint module

use super::*;
use crate::http::{RequestOptions, Transport, TransportError, TransportResponse, TransportResult};
use crate::types::Method;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use test_case::test_case;
use tokio::sync::{mpsc, oneshot};

// ============================================================================
// Gated Transport
// ============================================================================

/// In-memory transport whose calls settle only when the test releases them
struct GatedTransport {
    calls: Mutex<Vec<(Method, String, RequestOptions)>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<TransportResult>>>,
    returned: mpsc::UnboundedSender<String>,
}

impl GatedTransport {
    fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (returned, rx) = mpsc::unbounded_channel();
        let transport = Self {
            calls: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
            returned,
        };
        (Arc::new(transport), rx)
    }

    /// Hold calls to `url` until the returned sender fires
    fn gate(&self, url: &str) -> oneshot::Sender<TransportResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(url.to_string(), rx);
        tx
    }

    /// Settle calls to `url` immediately with `result`
    fn respond(&self, url: &str, result: TransportResult) {
        let tx = self.gate(url);
        tx.send(result).unwrap();
    }

    fn calls(&self) -> Vec<(Method, String, RequestOptions)> {
        self.calls.lock().unwrap().clone()
    }

    async fn call(&self, method: Method, url: &str, options: &RequestOptions) -> TransportResult {
        self.calls
            .lock()
            .unwrap()
            .push((method, url.to_string(), options.clone()));
        let gate = self.gates.lock().unwrap().remove(url);
        let result = match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::network("gate dropped"))),
            None => Ok(TransportResponse::new(200, json!({ "url": url }))),
        };
        let _ = self.returned.send(url.to_string());
        result
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn get(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.call(Method::GET, url, options).await
    }

    async fn post(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.call(Method::POST, url, options).await
    }

    async fn patch(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.call(Method::PATCH, url, options).await
    }

    async fn delete(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.call(Method::DELETE, url, options).await
    }
}

/// Transport that fails every call by panicking
struct PanickingTransport;

#[async_trait]
impl Transport for PanickingTransport {
    async fn get(&self, _url: &str, _options: &RequestOptions) -> TransportResult {
        panic!("transport exploded")
    }

    async fn post(&self, _url: &str, _options: &RequestOptions) -> TransportResult {
        panic!("transport exploded")
    }

    async fn patch(&self, _url: &str, _options: &RequestOptions) -> TransportResult {
        panic!("transport exploded")
    }

    async fn delete(&self, _url: &str, _options: &RequestOptions) -> TransportResult {
        panic!("transport exploded")
    }
}

/// Wait until the transport call for `url` has returned to the executor
async fn wait_returned(rx: &mut mpsc::UnboundedReceiver<String>, url: &str) {
    while let Some(returned) = rx.recv().await {
        if returned == url {
            // Let the operation publish (or drop) its outcome
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            return;
        }
    }
    panic!("transport closed before {url} returned");
}

fn ok(status: u16, data: Value) -> TransportResult {
    Ok(TransportResponse::new(status, data))
}

// ============================================================================
// Descriptor Tests
// ============================================================================

#[test]
fn test_descriptor_builders() {
    let descriptor = EndpointDescriptor::post("/items", json!({"name": "x"}))
        .query("dry_run", "true")
        .header("X-Trace", "1");

    assert_eq!(descriptor.method, Method::POST);
    assert_eq!(descriptor.url, "/items");
    assert_eq!(descriptor.options.body, Some(json!({"name": "x"})));
    assert_eq!(
        descriptor.options.query.get("dry_run"),
        Some(&"true".to_string())
    );
    assert_eq!(descriptor.to_string(), "POST /items?dry_run=true");
}

#[test]
fn test_descriptor_value_equality() {
    let a = EndpointDescriptor::get("/items")
        .query("cursor", "abc")
        .query("limit", "10");
    let b = EndpointDescriptor::get("/items")
        .query("limit", "10")
        .query("cursor", "abc");
    assert_eq!(a, b);

    assert_ne!(a, b.clone().query("cursor", "def"));
    assert_ne!(
        EndpointDescriptor::get("/items"),
        EndpointDescriptor::delete("/items")
    );
}

#[test]
fn test_descriptor_deserialize_flattened_options() {
    let descriptor: EndpointDescriptor = serde_yaml::from_str(
        r"
method: PATCH
url: /items/1
body: { name: renamed }
headers: { X-Api-Key: secret }
timeout_ms: 500
",
    )
    .unwrap();

    assert_eq!(
        descriptor,
        EndpointDescriptor::patch("/items/1", json!({"name": "renamed"}))
            .header("X-Api-Key", "secret")
            .timeout(std::time::Duration::from_millis(500))
    );
}

// ============================================================================
// RequestState Tests
// ============================================================================

#[test]
fn test_request_state_shapes() {
    let loading: RequestState<Value> = RequestState::loading();
    assert!(loading.loading);
    assert_eq!(loading.status, 0);
    assert!(loading.message.is_empty());
    assert!(!loading.is_settled());
    assert_eq!(loading, RequestState::default());

    let success = RequestState::success(200, json!([1]));
    assert!(success.is_success());
    assert!(!success.is_failure());

    let failure: RequestState<Value> = RequestState::failure(404, "not found");
    assert!(failure.is_failure());
    assert_eq!(failure.data, None);
}

#[test]
fn test_cancel_guard_shared_between_clones() {
    let guard = CancelGuard::new();
    let captured = guard.clone();
    assert!(!captured.is_cancelled());

    guard.cancel();
    assert!(captured.is_cancelled());
}

// ============================================================================
// RequestExecutor Tests
// ============================================================================

#[tokio::test]
async fn test_initial_state_is_loading() {
    let (transport, _returned) = GatedTransport::new();
    let executor = RequestExecutor::<Value>::new(transport);

    assert_eq!(executor.state(), RequestState::loading());
    assert!(executor.descriptor().is_none());
    assert!(!executor.is_in_flight());
}

#[tokio::test]
async fn test_get_success() {
    let (transport, _returned) = GatedTransport::new();
    transport.respond("/items", ok(200, json!([{"id": 1}])));

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    assert!(executor.execute(EndpointDescriptor::get("/items")));

    let state = executor.settled().await;
    assert_eq!(
        state,
        RequestState {
            loading: false,
            data: Some(json!([{"id": 1}])),
            status: 200,
            message: String::new(),
        }
    );
}

#[tokio::test]
async fn test_failure_carries_response_status() {
    let (transport, _returned) = GatedTransport::new();
    transport.respond(
        "/items",
        Err(TransportError::with_status(404, "not found")),
    );

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/items"));

    assert_eq!(
        executor.settled().await,
        RequestState {
            loading: false,
            data: None,
            status: 404,
            message: "not found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_failure_without_response_defaults_to_400() {
    let (transport, _returned) = GatedTransport::new();
    transport.respond("/items", Err(TransportError::network("network down")));

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/items"));

    let state = executor.settled().await;
    assert_eq!(state.status, DEFAULT_FAILURE_STATUS);
    assert_eq!(state.status, 400);
    assert_eq!(state.message, "network down");
    assert!(!state.loading);
}

#[tokio::test]
async fn test_panicking_transport_settles_as_failure() {
    let mut executor = RequestExecutor::<Value>::new(Arc::new(PanickingTransport));
    executor.execute(EndpointDescriptor::get("/items"));

    let state = tokio::time::timeout(std::time::Duration::from_secs(5), executor.settled())
        .await
        .expect("executor never settled");
    assert!(state.is_failure());
    assert_eq!(state.status, DEFAULT_FAILURE_STATUS);
    assert!(state.message.starts_with("Request aborted"));
}

#[tokio::test]
async fn test_typed_payload() {
    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    struct Item {
        id: u32,
    }

    let (transport, _returned) = GatedTransport::new();
    transport.respond("/items", ok(200, json!([{"id": 1}, {"id": 2}])));

    let mut executor = RequestExecutor::<Vec<Item>>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/items"));

    let state = executor.settled().await;
    assert_eq!(state.data, Some(vec![Item { id: 1 }, Item { id: 2 }]));
}

#[tokio::test]
async fn test_undecodable_payload_settles_as_failure() {
    let (transport, _returned) = GatedTransport::new();
    transport.respond("/items", ok(200, json!({"not": "a list"})));

    let mut executor = RequestExecutor::<Vec<u32>>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/items"));

    let state = executor.settled().await;
    assert!(state.is_failure());
    assert_eq!(state.status, 200);
    assert!(state.message.starts_with("Failed to decode response"));
}

#[test_case(Method::GET ; "get")]
#[test_case(Method::POST ; "post")]
#[test_case(Method::PATCH ; "patch")]
#[test_case(Method::DELETE ; "delete")]
#[tokio::test]
async fn test_dispatches_by_method(method: Method) {
    let (transport, _returned) = GatedTransport::new();
    let mut executor = RequestExecutor::<Value>::new(transport.clone());

    executor.execute(EndpointDescriptor::new(method, "/resource"));
    let state = executor.settled().await;

    assert_eq!(state.status, 200);
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, method);
    assert_eq!(calls[0].1, "/resource");
}

#[tokio::test]
async fn test_full_descriptor_reaches_transport() {
    let (transport, _returned) = GatedTransport::new();
    let mut executor = RequestExecutor::<Value>::new(transport.clone());

    let descriptor = EndpointDescriptor::post("/items", json!({"name": "x"}))
        .query("cursor", "abc")
        .header("X-Api-Key", "secret");
    executor.execute(descriptor.clone());
    executor.settled().await;

    let calls = transport.calls();
    assert_eq!(calls[0].2, descriptor.options);
}

#[tokio::test]
async fn test_value_equal_descriptor_is_not_refetched() {
    let (transport, mut returned) = GatedTransport::new();
    let release = transport.gate("/items");

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    assert!(executor.execute(EndpointDescriptor::get("/items").query("limit", "10")));

    let mut rx = executor.subscribe();
    rx.borrow_and_update();

    assert!(!executor.execute(EndpointDescriptor::get("/items").query("limit", "10")));
    assert!(!rx.has_changed().unwrap());

    release.send(ok(200, json!([]))).unwrap();
    wait_returned(&mut returned, "/items").await;

    assert!(!executor.execute(EndpointDescriptor::get("/items").query("limit", "10")));
    assert!(executor.state().is_success());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_new_descriptor_resets_to_loading() {
    let (transport, _returned) = GatedTransport::new();
    let mut executor = RequestExecutor::<Value>::new(transport.clone());

    executor.execute(EndpointDescriptor::get("/a"));
    assert!(executor.settled().await.is_success());

    let _release = transport.gate("/b");
    assert!(executor.execute(EndpointDescriptor::get("/b")));
    assert_eq!(executor.state(), RequestState::loading());
    assert!(executor.is_in_flight());
}

#[tokio::test]
async fn test_superseded_result_arriving_late_is_dropped() {
    let (transport, mut returned) = GatedTransport::new();
    let release_a = transport.gate("/a");
    let release_b = transport.gate("/b");

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/a"));
    executor.execute(EndpointDescriptor::get("/b"));

    release_b.send(ok(200, json!("b"))).unwrap();
    let state = executor.settled().await;
    assert_eq!(state.data, Some(json!("b")));

    release_a.send(ok(200, json!("a"))).unwrap();
    wait_returned(&mut returned, "/a").await;

    assert_eq!(executor.state(), RequestState::success(200, json!("b")));
}

#[tokio::test]
async fn test_superseded_result_arriving_first_is_dropped() {
    let (transport, mut returned) = GatedTransport::new();
    let release_a = transport.gate("/a");
    let release_b = transport.gate("/b");

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/a"));
    executor.execute(EndpointDescriptor::get("/b"));

    release_a
        .send(Err(TransportError::with_status(500, "boom")))
        .unwrap();
    wait_returned(&mut returned, "/a").await;
    assert_eq!(executor.state(), RequestState::loading());

    release_b.send(ok(201, json!("b"))).unwrap();
    assert_eq!(
        executor.settled().await,
        RequestState::success(201, json!("b"))
    );
}

#[tokio::test]
async fn test_readopting_previous_descriptor_dispatches_again() {
    let (transport, _returned) = GatedTransport::new();
    let mut executor = RequestExecutor::<Value>::new(transport.clone());

    assert!(executor.execute(EndpointDescriptor::get("/a")));
    assert!(executor.execute(EndpointDescriptor::get("/b")));
    assert!(executor.execute(EndpointDescriptor::get("/a")));
    executor.settled().await;

    let urls: Vec<String> = transport.calls().into_iter().map(|c| c.1).collect();
    assert_eq!(urls.len(), 3);
    assert_eq!(
        executor.state().data,
        Some(json!({"url": "/a"}))
    );
}

#[tokio::test]
async fn test_teardown_suppresses_in_flight_result() {
    let (transport, mut returned) = GatedTransport::new();
    let release = transport.gate("/items");

    let mut executor = RequestExecutor::<Value>::new(transport.clone());
    executor.execute(EndpointDescriptor::get("/items"));
    let mut rx = executor.subscribe();
    rx.borrow_and_update();

    executor.teardown();
    release.send(ok(200, json!([1, 2, 3]))).unwrap();
    wait_returned(&mut returned, "/items").await;

    assert!(!rx.has_changed().unwrap_or(false));
    assert!(rx.borrow().loading);
}
