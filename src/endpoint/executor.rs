//! Request executor
//!
//! Issues one transport call per adopted [`EndpointDescriptor`] and publishes
//! its lifecycle as a [`RequestState`]. Adopting a new descriptor supersedes
//! the in-flight call: the call keeps running, but its outcome is dropped.

use super::descriptor::EndpointDescriptor;
use super::state::{CancelGuard, RequestState, DEFAULT_FAILURE_STATUS};
use crate::http::{Transport, TransportResult};
use crate::types::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// The descriptor currently owning the state, and its operation
struct Adopted {
    descriptor: EndpointDescriptor,
    guard: CancelGuard,
    handle: JoinHandle<()>,
}

/// Observable executor for one presentation context
pub struct RequestExecutor<T> {
    transport: Arc<dyn Transport>,
    state: Arc<watch::Sender<RequestState<T>>>,
    current: Option<Adopted>,
}

impl<T> RequestExecutor<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create an executor over a transport. The state starts out loading.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(RequestState::loading());
        Self {
            transport,
            state: Arc::new(state),
            current: None,
        }
    }

    /// Adopt `descriptor` and dispatch its call unless it equals the one
    /// already adopted. Returns whether a new call was dispatched.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn execute(&mut self, descriptor: EndpointDescriptor) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|adopted| adopted.descriptor == descriptor)
        {
            trace!("Descriptor unchanged, keeping {}", descriptor);
            return false;
        }

        if let Some(previous) = self.current.take() {
            debug!("Superseding {}", previous.descriptor);
            previous.guard.cancel();
        }

        let guard = CancelGuard::new();
        self.state.send_replace(RequestState::loading());

        debug!("Dispatching {}", descriptor);
        let handle = tokio::spawn(run_operation(
            Arc::clone(&self.transport),
            descriptor.clone(),
            guard.clone(),
            Arc::clone(&self.state),
        ));

        self.current = Some(Adopted {
            descriptor,
            guard,
            handle,
        });
        true
    }

    /// Latest request state
    pub fn state(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state.subscribe()
    }

    /// Wait until the adopted call settles and return its terminal state.
    ///
    /// Never resolves if no descriptor has been adopted.
    pub async fn settled(&self) -> RequestState<T> {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(RequestState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// The currently adopted descriptor
    pub fn descriptor(&self) -> Option<&EndpointDescriptor> {
        self.current.as_ref().map(|adopted| &adopted.descriptor)
    }

    /// Whether the adopted call has not finished yet
    pub fn is_in_flight(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|adopted| !adopted.handle.is_finished())
    }

    /// Tear the executor down, suppressing any in-flight outcome
    pub fn teardown(self) {
        drop(self);
    }
}

impl<T> Drop for RequestExecutor<T> {
    fn drop(&mut self) {
        if let Some(adopted) = self.current.take() {
            trace!("Tearing down {}", adopted.descriptor);
            adopted.guard.cancel();
        }
    }
}

impl<T> std::fmt::Debug for RequestExecutor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("descriptor", &self.current.as_ref().map(|a| &a.descriptor))
            .finish_non_exhaustive()
    }
}

/// Perform one call and publish its outcome unless the guard was flipped
async fn run_operation<T>(
    transport: Arc<dyn Transport>,
    descriptor: EndpointDescriptor,
    guard: CancelGuard,
    state: Arc<watch::Sender<RequestState<T>>>,
) where
    T: DeserializeOwned,
{
    // The call runs in its own task so a panicking transport still settles
    let call = {
        let descriptor = descriptor.clone();
        tokio::spawn(async move { dispatch(transport.as_ref(), &descriptor).await })
    };
    let next = match call.await {
        Ok(outcome) => settle(&descriptor, outcome),
        Err(e) => {
            warn!("Call for {} aborted: {}", descriptor, e);
            RequestState::failure(DEFAULT_FAILURE_STATUS, format!("Request aborted: {e}"))
        }
    };

    // Checked under the channel's write lock so a supersession that has
    // already flipped the guard can never be overwritten.
    state.send_if_modified(|current| {
        if guard.is_cancelled() {
            trace!("Dropping stale result for {}", descriptor);
            return false;
        }
        *current = next;
        true
    });
}

/// Route the descriptor to the transport call for its verb
async fn dispatch(transport: &dyn Transport, descriptor: &EndpointDescriptor) -> TransportResult {
    let url = descriptor.url.as_str();
    let options = &descriptor.options;
    match descriptor.method {
        Method::GET => transport.get(url, options).await,
        Method::POST => transport.post(url, options).await,
        Method::PATCH => transport.patch(url, options).await,
        Method::DELETE => transport.delete(url, options).await,
    }
}

/// Normalize a transport outcome into a terminal state
fn settle<T: DeserializeOwned>(
    descriptor: &EndpointDescriptor,
    outcome: TransportResult,
) -> RequestState<T> {
    match outcome {
        Ok(response) => match serde_json::from_value::<T>(response.data) {
            Ok(data) => {
                debug!("Settled {} with {}", descriptor, response.status);
                RequestState::success(response.status, data)
            }
            Err(e) => {
                warn!("Failed to decode response of {}: {}", descriptor, e);
                RequestState::failure(response.status, format!("Failed to decode response: {e}"))
            }
        },
        Err(err) => {
            let status = err.status.unwrap_or(DEFAULT_FAILURE_STATUS);
            debug!("Failed {} with {}: {}", descriptor, status, err.message);
            RequestState::failure(status, err.message)
        }
    }
}
