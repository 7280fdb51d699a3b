//! Page browser
//!
//! Drives one table view over a cursor-paginated endpoint: the current cursor
//! selects the request, the response yields the next cursor, and the cursor
//! flags decide which navigation actions are offered.

use super::source::PageSource;
use crate::endpoint::{RequestExecutor, RequestState};
use crate::error::{Error, Result};
use crate::extract::{extract_records, extract_string};
use crate::http::Transport;
use crate::pagination::{CursorController, CursorManager, CursorValues};
use crate::table::{
    columns_from_record, render_table, ColumnConfig, PageAction, RenderedTable, TableConfig,
};
use crate::types::{JsonValue, SortOrder};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of loading one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Page index the view belongs to
    pub index: usize,
    /// Settled request state for the page
    pub state: RequestState<JsonValue>,
    /// Rendered records and navigation actions
    pub table: RenderedTable,
    /// Next-page cursor reported by the response, if any
    pub next_cursor: Option<String>,
}

/// Paginated table over one [`PageSource`]
#[derive(Debug)]
pub struct PageBrowser {
    source: PageSource,
    columns: Vec<ColumnConfig>,
    sort: SortOrder,
    cursors: CursorManager,
    controller: CursorController,
    executor: RequestExecutor<JsonValue>,
}

impl PageBrowser {
    /// Create a browser positioned on the first page.
    ///
    /// With no `columns`, columns are derived from the first record of each page.
    pub fn new(
        transport: Arc<dyn Transport>,
        source: PageSource,
        columns: Vec<ColumnConfig>,
    ) -> Self {
        let cursors = CursorManager::new();
        let controller = cursors.controller();
        Self {
            source,
            columns,
            sort: SortOrder::default(),
            cursors,
            controller,
            executor: RequestExecutor::new(transport),
        }
    }

    /// Current pagination values
    pub fn values(&self) -> CursorValues {
        self.cursors.values()
    }

    /// Pagination session, for subscribing to changes
    pub fn cursors(&self) -> &CursorManager {
        &self.cursors
    }

    /// Active sort order
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Fetch (or re-read) the current page and register its next cursor.
    ///
    /// Reloading a page whose descriptor is unchanged does not refetch it.
    pub async fn load(&mut self) -> Result<PageView> {
        let values = self.cursors.values();
        let index = values.current_index();
        let cursor = values
            .current_cursor()
            .ok_or_else(|| Error::navigation(index, values.len()))?
            .to_string();

        let descriptor = self.source.descriptor_for(&cursor, self.sort);
        if self.executor.execute(descriptor) {
            debug!("Loading page {index}");
        }
        let state = self.executor.settled().await;

        let (records, next_cursor) = match state.data {
            Some(ref payload) if state.is_success() => {
                let records = extract_records(payload, self.source.records_path.as_deref())?;
                let next = extract_string(payload, &self.source.next_cursor_path)?;
                // A missing cursor registers "", which is always known
                self.controller.add_next_cursor(next.clone().unwrap_or_default());
                (records, next.filter(|c| !c.is_empty()))
            }
            _ => {
                info!("Page {index} failed with {}: {}", state.status, state.message);
                (Vec::new(), None)
            }
        };

        let columns = if self.columns.is_empty() {
            records.first().map(columns_from_record).unwrap_or_default()
        } else {
            self.columns.clone()
        };

        let values = self.cursors.values();
        let table = render_table(&TableConfig::new(columns, records), self.sort, Some(&values));

        Ok(PageView {
            index,
            state,
            table,
            next_cursor,
        })
    }

    /// Move forward if a next page is known
    pub fn next_page(&self) -> bool {
        let values = self.cursors.values();
        if !values.has_next() {
            return false;
        }
        self.controller.go_to(values.current_index() + 1);
        true
    }

    /// Move back if a previous page is known
    pub fn prev_page(&self) -> bool {
        let values = self.cursors.values();
        if !values.has_prev() {
            return false;
        }
        self.controller.go_to(values.current_index() - 1);
        true
    }

    /// Follow a rendered navigation action
    pub fn apply(&self, action: PageAction) {
        self.controller.go_to(action.target());
    }

    /// Jump to a discovered page
    pub fn go_to(&self, index: usize) -> Result<()> {
        self.controller.try_go_to(index)
    }

    /// Swap the sort order. Discovered cursors belong to the old ordering,
    /// so the session starts over from the first page.
    pub fn toggle_sort(&mut self) {
        self.sort.toggle();
        self.controller.reset();
        debug!("Sort order is now {}", self.sort);
    }
}
