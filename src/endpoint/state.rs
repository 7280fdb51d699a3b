//! Request lifecycle state

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Status reported for failures that never reached a server
pub const DEFAULT_FAILURE_STATUS: u16 = 400;

/// Uniform loading / result / error view of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestState<T> {
    /// True from adoption until the call settles
    pub loading: bool,
    /// Payload of a successful call
    pub data: Option<T>,
    /// Response status, 0 while loading
    pub status: u16,
    /// Failure text, empty unless the call failed
    pub message: String,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> RequestState<T> {
    /// Initial shape of every lifecycle
    pub fn loading() -> Self {
        Self {
            loading: true,
            data: None,
            status: 0,
            message: String::new(),
        }
    }

    /// Success terminal
    pub fn success(status: u16, data: T) -> Self {
        Self {
            loading: false,
            data: Some(data),
            status,
            message: String::new(),
        }
    }

    /// Failure terminal
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            loading: false,
            data: None,
            status,
            message: message.into(),
        }
    }

    /// Whether the call has settled either way
    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    /// Whether the call settled with a payload
    pub fn is_success(&self) -> bool {
        !self.loading && self.data.is_some()
    }

    /// Whether the call settled without a payload
    pub fn is_failure(&self) -> bool {
        !self.loading && self.data.is_none()
    }
}

/// Cooperative cancellation flag shared between an executor and one operation.
///
/// Flipping it does not abort the network call; it only stops the operation
/// from publishing its outcome.
#[derive(Debug, Clone, Default)]
pub struct CancelGuard {
    cancelled: Arc<AtomicBool>,
}

impl CancelGuard {
    /// Create an active guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress any further state transitions of the guarded operation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the guarded operation has been superseded or torn down
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
