//! HTTP transport module
//!
//! Provides the transport capability the request executor is built on.
//!
//! # Features
//!
//! - **Transport trait**: one async call per verb (GET, POST, PATCH, DELETE)
//! - **Uniform outcome**: `{status, data}` on success, `{status?, message}` on failure
//! - **reqwest implementation**: base URL, default headers, timeouts

mod client;
mod transport;

pub use client::{default_user_agent, HttpClientConfig, HttpClientConfigBuilder, HttpTransport};
pub use transport::{
    RequestOptions, Transport, TransportError, TransportResponse, TransportResult,
};
