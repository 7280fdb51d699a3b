//! Cursor manager
//!
//! Owns a [`CursorStore`] behind a watch channel so presentation code can read
//! the latest values and react to every change.

use super::store::CursorStore;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of the pagination state handed to renderers
pub type CursorValues = CursorStore;

/// Observable owner of one pagination session
#[derive(Debug)]
pub struct CursorManager {
    state: Arc<watch::Sender<CursorStore>>,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorManager {
    /// Start a new session
    pub fn new() -> Self {
        let (state, _) = watch::channel(CursorStore::new());
        Self {
            state: Arc::new(state),
        }
    }

    /// Latest pagination values
    pub fn values(&self) -> CursorValues {
        self.state.borrow().clone()
    }

    /// Cursor of the current page, if it has been discovered
    pub fn current_cursor(&self) -> Option<String> {
        self.state.borrow().current_cursor().map(ToString::to_string)
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<CursorStore> {
        self.state.subscribe()
    }

    /// Mutation handle for this session
    pub fn controller(&self) -> CursorController {
        CursorController {
            state: Arc::clone(&self.state),
        }
    }
}

/// Mutation surface of a [`CursorManager`].
///
/// Each call updates the store in one step and then notifies subscribers.
#[derive(Debug, Clone)]
pub struct CursorController {
    state: Arc<watch::Sender<CursorStore>>,
}

impl CursorController {
    /// Register the cursor of the next page. Duplicate tokens are ignored but
    /// subscribers are still notified of the recomputed flags.
    pub fn add_next_cursor(&self, token: impl Into<String>) -> bool {
        let token = token.into();
        let mut inserted = false;
        self.state.send_modify(|store| inserted = store.add_next_cursor(token));
        inserted
    }

    /// Move to a page without bounds checking
    pub fn go_to(&self, index: usize) {
        self.state.send_modify(|store| store.go_to(index));
    }

    /// Move to a page whose cursor has been discovered
    pub fn try_go_to(&self, index: usize) -> Result<()> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|store| {
            outcome = store.try_go_to(index);
            outcome.is_ok()
        });
        outcome
    }

    /// Start the session over from the first page
    pub fn reset(&self) {
        self.state.send_modify(CursorStore::reset);
    }
}
