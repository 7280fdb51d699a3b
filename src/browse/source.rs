//! Paged data source definition

use crate::endpoint::EndpointDescriptor;
use crate::error::{Error, Result};
use crate::types::SortOrder;
use serde::{Deserialize, Serialize};

/// Cursor-paginated endpoint and where to find records and the next cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSource {
    /// Request for the first page; the cursor is added as a query parameter
    pub endpoint: EndpointDescriptor,
    /// Query parameter carrying the page cursor
    #[serde(default = "default_cursor_param")]
    pub cursor_param: String,
    /// Path to the record array (whole payload when absent)
    #[serde(default)]
    pub records_path: Option<String>,
    /// Path to the next page's cursor token
    pub next_cursor_path: String,
    /// Query parameter carrying the sort order, if the endpoint sorts
    #[serde(default)]
    pub sort_param: Option<String>,
}

fn default_cursor_param() -> String {
    "cursor".to_string()
}

impl PageSource {
    /// Create a source with the default `cursor` parameter
    pub fn new(endpoint: EndpointDescriptor, next_cursor_path: impl Into<String>) -> Self {
        Self {
            endpoint,
            cursor_param: default_cursor_param(),
            records_path: None,
            next_cursor_path: next_cursor_path.into(),
            sort_param: None,
        }
    }

    /// Set the cursor query parameter
    #[must_use]
    pub fn cursor_param(mut self, param: impl Into<String>) -> Self {
        self.cursor_param = param.into();
        self
    }

    /// Set the record path
    #[must_use]
    pub fn records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = Some(path.into());
        self
    }

    /// Set the sort query parameter
    #[must_use]
    pub fn sort_param(mut self, param: impl Into<String>) -> Self {
        self.sort_param = Some(param.into());
        self
    }

    /// Descriptor for the page behind `cursor`. The first page (`""`) is
    /// requested without a cursor parameter.
    pub fn descriptor_for(&self, cursor: &str, sort: SortOrder) -> EndpointDescriptor {
        let mut descriptor = self.endpoint.clone();
        if !cursor.is_empty() {
            descriptor = descriptor.query(self.cursor_param.as_str(), cursor);
        }
        if let Some(ref param) = self.sort_param {
            descriptor = descriptor.query(param.as_str(), sort.as_str());
        }
        descriptor
    }

    /// Check the fields a browser cannot run without
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.url.trim().is_empty() {
            return Err(Error::missing_field("source.endpoint.url"));
        }
        if self.cursor_param.trim().is_empty() {
            return Err(Error::invalid_value(
                "source.cursor_param",
                "must not be empty",
            ));
        }
        if self.next_cursor_path.trim().is_empty() {
            return Err(Error::missing_field("source.next_cursor_path"));
        }
        Ok(())
    }
}
