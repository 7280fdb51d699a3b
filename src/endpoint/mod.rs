//! Endpoint module
//!
//! Generic, cancellable remote-data retrieval.
//!
//! # Overview
//!
//! - `EndpointDescriptor` - method, URL and options of one call, compared by value
//! - `RequestState` - `{loading, data, status, message}` view of a call
//! - `RequestExecutor` - dispatches one call per descriptor change and
//!   drops the outcome of superseded calls
//! - `CancelGuard` - flag that stops a superseded call from publishing

mod descriptor;
mod executor;
mod state;

pub use descriptor::EndpointDescriptor;
pub use executor::RequestExecutor;
pub use state::{CancelGuard, RequestState, DEFAULT_FAILURE_STATUS};

#[cfg(test)]
mod tests;
