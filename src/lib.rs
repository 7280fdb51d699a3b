// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagefetch
//!
//! Client-side data access for tabular views: cursor pagination and
//! cancellable remote-data retrieval.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Append-only discovery of opaque page cursors with
//!   derived previous/next availability
//! - **Request Executor**: One HTTP call per descriptor change, exposed as a
//!   uniform `{loading, data, status, message}` state
//! - **Stale-Response Suppression**: Superseded or torn-down calls never
//!   overwrite newer state
//! - **Table Rendering**: Column/row configuration rendered with navigation actions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagefetch::endpoint::{EndpointDescriptor, RequestExecutor};
//! use pagefetch::http::HttpTransport;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pagefetch::Result<()> {
//!     let transport = Arc::new(HttpTransport::new()?);
//!     let mut executor = RequestExecutor::<serde_json::Value>::new(transport);
//!
//!     executor.execute(EndpointDescriptor::get("https://api.example.com/items"));
//!     let state = executor.settled().await;
//!     println!("{} {:?}", state.status, state.data);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 PageBrowser (presentation)                   │
//! │  cursor → descriptor → execute → settled → next cursor       │
//! └──────────────────────────────────────────────────────────────┘
//!                 │                               │
//! ┌───────────────┴──────────────┐ ┌──────────────┴───────────────┐
//! │ CursorManager / Controller   │ │ RequestExecutor<T>           │
//! │ {0:""} → append-only cursors │ │ CancelGuard per operation    │
//! │ has_prev / has_next          │ │ RequestState<T>              │
//! └──────────────────────────────┘ └──────────────┬───────────────┘
//!                                                 │
//!                                  ┌──────────────┴───────────────┐
//!                                  │ Transport (GET/POST/PATCH/   │
//!                                  │ DELETE) → HttpTransport      │
//!                                  └──────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Cursor pagination state
pub mod pagination;

/// Transport capability and its reqwest implementation
pub mod http;

/// Endpoint descriptors and the request executor
pub mod endpoint;

/// Record and cursor extraction from payloads
pub mod extract;

/// Table configuration and rendering
pub mod table;

/// Paginated table browsing
pub mod browse;

/// Configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use browse::{PageBrowser, PageSource};
pub use endpoint::{EndpointDescriptor, RequestExecutor, RequestState};
pub use pagination::{CursorController, CursorManager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
