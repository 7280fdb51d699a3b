//! Transport abstraction
//!
//! The request executor never talks to the network directly. It is handed a
//! [`Transport`] with one call per HTTP verb, which resolves to a status and a
//! JSON payload or rejects with an optional status and a message.

use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Per-request options sent alongside the URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Query parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
    /// Request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// JSON body, sent with POST and PATCH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
    /// Override the client timeout for this request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Timeout override as a duration
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// A settled, successful transport call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded response payload (`null` for an empty body)
    pub data: JsonValue,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: u16, data: JsonValue) -> Self {
        Self { status, data }
    }
}

/// A rejected transport call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Status code, present when the server answered
    pub status: Option<u16>,
    /// Human-readable failure text
    pub message: String,
}

impl TransportError {
    /// Failure that carries a response status
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Failure with no response (connection refused, timeout, ...)
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Outcome of a transport call
pub type TransportResult = std::result::Result<TransportResponse, TransportError>;

/// Injected HTTP capability, one method per verb
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request
    async fn get(&self, url: &str, options: &RequestOptions) -> TransportResult;

    /// Perform a POST request
    async fn post(&self, url: &str, options: &RequestOptions) -> TransportResult;

    /// Perform a PATCH request
    async fn patch(&self, url: &str, options: &RequestOptions) -> TransportResult;

    /// Perform a DELETE request
    async fn delete(&self, url: &str, options: &RequestOptions) -> TransportResult;
}
