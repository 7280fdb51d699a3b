//! Pagination module
//!
//! Cursor-indexed pagination: a store of opaque page cursors discovered one
//! page at a time, and the navigation flags derived from it.
//!
//! # Overview
//!
//! - `CursorStore` - page index to cursor map plus `has_prev` / `has_next`
//! - `CursorManager` - observable owner of a store for one presentation context
//! - `CursorController` - append-only cursor discovery and navigation

mod manager;
mod store;

pub use manager::{CursorController, CursorManager, CursorValues};
pub use store::{CursorMap, CursorStore};
