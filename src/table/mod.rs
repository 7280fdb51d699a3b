//! Table module
//!
//! Column/row configuration and a text renderer for paginated tables.
//!
//! The renderer resolves each cell as `record[data_attribute]`, marks sortable
//! headers with the active sort order, and exposes "previous" / "next"
//! actions only when the pagination values allow them.

mod render;
mod types;

pub use render::{render_table, HeaderCell, PageAction, RenderedTable};
pub use types::{columns_from_record, ColumnConfig, TableConfig};
