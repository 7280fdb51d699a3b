//! Endpoint descriptors
//!
//! An [`EndpointDescriptor`] fully describes one remote call. Two descriptors
//! that compare equal describe the same request, so re-adopting one must not
//! trigger a new fetch.

use crate::http::RequestOptions;
use crate::types::{JsonValue, Method};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Immutable description of a remote call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// Absolute URL, or a path relative to the transport's base URL
    pub url: String,
    /// Query, headers, body and timeout
    #[serde(flatten)]
    pub options: RequestOptions,
}

impl EndpointDescriptor {
    /// Create a descriptor with empty options
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            options: RequestOptions::default(),
        }
    }

    /// GET descriptor
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// POST descriptor with a JSON body
    pub fn post(url: impl Into<String>, body: JsonValue) -> Self {
        Self::new(Method::POST, url).json(body)
    }

    /// PATCH descriptor with a JSON body
    pub fn patch(url: impl Into<String>, body: JsonValue) -> Self {
        Self::new(Method::PATCH, url).json(body)
    }

    /// DELETE descriptor
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options = self.options.query(key, value);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options = self.options.header(key, value);
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.options = self.options.json(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.timeout(timeout);
        self
    }
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        let mut sep = '?';
        for (key, value) in &self.options.query {
            write!(f, "{sep}{key}={value}")?;
            sep = '&';
        }
        Ok(())
    }
}
