//! Table configuration types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// How to render one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Record attribute rendered in this column
    #[serde(alias = "dataAttr", alias = "dataAttribute")]
    pub data_attribute: String,
    /// Column heading
    #[serde(alias = "columnHeader")]
    pub header: String,
    /// Whether clicking the heading swaps the sort order
    #[serde(default)]
    pub sortable: bool,
}

impl ColumnConfig {
    /// Create a non-sortable column
    pub fn new(data_attribute: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            data_attribute: data_attribute.into(),
            header: header.into(),
            sortable: false,
        }
    }

    /// Make the column sortable
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Columns plus the rows to render under them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Column definitions, in display order
    pub columns: Vec<ColumnConfig>,
    /// Keyed records
    #[serde(default)]
    pub rows: Vec<JsonValue>,
}

impl TableConfig {
    /// Create a table config
    pub fn new(columns: Vec<ColumnConfig>, rows: Vec<JsonValue>) -> Self {
        Self { columns, rows }
    }
}

/// One column per key of `record`, headed by the key itself
pub fn columns_from_record(record: &JsonValue) -> Vec<ColumnConfig> {
    match record {
        JsonValue::Object(map) => map
            .keys()
            .map(|key| ColumnConfig::new(key.clone(), key.clone()))
            .collect(),
        _ => Vec::new(),
    }
}
