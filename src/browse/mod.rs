//! Browse module
//!
//! Paginated table browsing over a cursor-paginated endpoint, built from the
//! pagination and endpoint primitives.

mod browser;
mod source;

pub use browser::{PageBrowser, PageView};
pub use source::PageSource;
