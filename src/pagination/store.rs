//! Cursor store
//!
//! Pure state container mapping page index to the opaque cursor token that
//! fetches it, plus the navigation flags derived from the current index.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Page index to cursor token. Index 0 is always bound to `""`.
pub type CursorMap = BTreeMap<usize, String>;

/// Cursor session state: discovered cursors, position, and navigation flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CursorStore {
    cursors: CursorMap,
    current_index: usize,
    has_prev: bool,
    has_next: bool,
}

impl Default for CursorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorStore {
    /// Start a session: `{0: ""}`, index 0, no navigation available
    pub fn new() -> Self {
        let mut cursors = CursorMap::new();
        cursors.insert(0, String::new());
        Self {
            cursors,
            current_index: 0,
            has_prev: false,
            has_next: false,
        }
    }

    /// All discovered cursors
    pub fn cursors(&self) -> &CursorMap {
        &self.cursors
    }

    /// Index of the page the user is on
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether a previous page has a known cursor
    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    /// Whether a next page has a known cursor
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Number of discovered pages
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Always false; the first page is known from the start
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Cursor for a page, if discovered
    pub fn cursor(&self, index: usize) -> Option<&str> {
        self.cursors.get(&index).map(String::as_str)
    }

    /// Cursor for the current page. `None` after navigating past the known pages.
    pub fn current_cursor(&self) -> Option<&str> {
        self.cursor(self.current_index)
    }

    /// Whether `token` is bound to any discovered page
    pub fn cursor_exists(&self, token: &str) -> bool {
        self.cursors.values().any(|c| c == token)
    }

    /// Append `token` as the cursor of the next undiscovered page.
    ///
    /// Known tokens are ignored so re-fetching a page cannot register its
    /// successor twice. The navigation flags are recomputed either way.
    /// Returns whether the token was inserted.
    pub fn add_next_cursor(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        let inserted = if self.cursor_exists(&token) {
            debug!("Cursor {token:?} already known, skipping");
            false
        } else {
            let index = self.cursors.len();
            debug!("Discovered cursor {token:?} for page {index}");
            self.cursors.insert(index, token);
            true
        };
        self.recompute();
        inserted
    }

    /// Move to `index` without bounds checking.
    ///
    /// An index with no discovered cursor leaves both flags false (unless it
    /// sits right after the last known page), which disables navigation from there.
    pub fn go_to(&mut self, index: usize) {
        if !self.cursors.contains_key(&index) {
            warn!(
                "Navigating to page {index} with no discovered cursor ({} known)",
                self.cursors.len()
            );
        }
        self.current_index = index;
        self.recompute();
    }

    /// Move to `index` only if its cursor has been discovered
    pub fn try_go_to(&mut self, index: usize) -> Result<()> {
        if !self.cursors.contains_key(&index) {
            return Err(Error::navigation(index, self.cursors.len()));
        }
        self.go_to(index);
        Ok(())
    }

    /// Drop every discovered cursor and return to the first page
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn recompute(&mut self) {
        self.has_prev = self
            .current_index
            .checked_sub(1)
            .is_some_and(|prev| self.cursors.contains_key(&prev));
        self.has_next = self
            .current_index
            .checked_add(1)
            .is_some_and(|next| self.cursors.contains_key(&next));
    }
}
