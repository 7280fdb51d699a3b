//! reqwest-backed transport
//!
//! Provides the default [`Transport`] implementation:
//! - Base URL joining for relative endpoint paths
//! - Default headers and user agent
//! - Per-request timeout, query and JSON body
//! - Non-2xx statuses reported as rejections

use super::transport::{
    RequestOptions, Transport, TransportError, TransportResponse, TransportResult,
};
use crate::error::Result;
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: BTreeMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: BTreeMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

/// `pagefetch/<version>`
pub fn default_user_agent() -> String {
    format!("pagefetch/{}", env!("CARGO_PKG_VERSION"))
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP transport over a shared reqwest client
pub struct HttpTransport {
    client: Client,
    config: HttpClientConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    async fn send(&self, method: Method, url: &str, options: &RequestOptions) -> TransportResult {
        let full_url = self.build_url(url);
        let mut req = self.client.request(method.into(), &full_url);

        req = req.headers(self.header_map(options)?);

        if !options.query.is_empty() {
            req = req.query(&options.query);
        }

        if method.has_body() {
            if let Some(ref body) = options.body {
                req = req.json(body);
            }
        }

        if let Some(timeout) = options.timeout_duration() {
            req = req.timeout(timeout);
        }

        debug!("Sending {} {}", method, full_url);

        let response = req
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("Request failed: {} {} -> {}", method, full_url, status);
            return Err(TransportError::with_status(
                status.as_u16(),
                format!("Request failed with status code {}", status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::with_status(status.as_u16(), e.to_string()))?;

        debug!("Request succeeded: {} {} -> {}", method, full_url, status);
        Ok(TransportResponse::new(status.as_u16(), decode_body(&bytes)))
    }

    /// Default headers overlaid with the request's own. A request header
    /// replaces a default of the same name.
    fn header_map(
        &self,
        options: &RequestOptions,
    ) -> std::result::Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        for (key, value) in self.config.default_headers.iter().chain(&options.headers) {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                TransportError::network(format!("Invalid header name '{key}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::network(format!("Invalid value for header '{key}': {e}"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.send(Method::GET, url, options).await
    }

    async fn post(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.send(Method::POST, url, options).await
    }

    async fn patch(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.send(Method::PATCH, url, options).await
    }

    async fn delete(&self, url: &str, options: &RequestOptions) -> TransportResult {
        self.send(Method::DELETE, url, options).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Empty bodies become `null`, non-JSON bodies a JSON string
fn decode_body(bytes: &[u8]) -> JsonValue {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return JsonValue::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned()))
}
