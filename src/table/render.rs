//! Table rendering

use super::types::TableConfig;
use crate::pagination::CursorValues;
use crate::types::{JsonValue, SortOrder};
use serde::Serialize;
use std::fmt;

/// A rendered column heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    /// Heading text
    pub header: String,
    /// Sort order a click would swap; `None` for non-sortable columns
    pub sort: Option<SortOrder>,
}

impl HeaderCell {
    /// Whether the heading carries a sort affordance
    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }
}

/// Navigation affordance shown under the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    /// Go to the previous page
    Previous { target: usize },
    /// Go to the next page
    Next { target: usize },
}

impl PageAction {
    /// Page index the action navigates to
    pub fn target(self) -> usize {
        match self {
            PageAction::Previous { target } | PageAction::Next { target } => target,
        }
    }
}

/// Header cells, body cells and navigation actions of one table view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
    pub actions: Vec<PageAction>,
}

/// Render a table view.
///
/// Sortable columns get `sort` as their affordance. Pagination actions are
/// only produced when `pagination` is supplied.
pub fn render_table(
    config: &TableConfig,
    sort: SortOrder,
    pagination: Option<&CursorValues>,
) -> RenderedTable {
    let headers = config
        .columns
        .iter()
        .map(|col| HeaderCell {
            header: col.header.clone(),
            sort: col.sortable.then_some(sort),
        })
        .collect();

    let rows = config
        .rows
        .iter()
        .map(|record| {
            config
                .columns
                .iter()
                .map(|col| cell_text(record.get(&col.data_attribute)))
                .collect()
        })
        .collect();

    let mut actions = Vec::new();
    if let Some(values) = pagination {
        let current = values.current_index();
        if values.has_prev() {
            actions.push(PageAction::Previous {
                target: current.saturating_sub(1),
            });
        }
        if values.has_next() {
            actions.push(PageAction::Next {
                target: current + 1,
            });
        }
    }

    RenderedTable {
        headers,
        rows,
        actions,
    }
}

fn cell_text(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl fmt::Display for RenderedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headings: Vec<String> = self
            .headers
            .iter()
            .map(|h| match h.sort {
                Some(SortOrder::Asc) => format!("{} ^", h.header),
                Some(SortOrder::Desc) => format!("{} v", h.header),
                None => h.header.clone(),
            })
            .collect();

        let mut widths: Vec<usize> = headings.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &headings, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }

        if !self.actions.is_empty() {
            let labels: Vec<&str> = self
                .actions
                .iter()
                .map(|action| match action {
                    PageAction::Previous { .. } => "[p] Previous",
                    PageAction::Next { .. } => "[n] Next",
                })
                .collect();
            writeln!(f, "{}", labels.join("  "))?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}
