//! Application configuration
//!
//! A single YAML (or JSON) document describing the HTTP transport, the paged
//! data source, and the table columns.

use crate::browse::PageSource;
use crate::error::{Error, Result, ResultExt};
use crate::http::{default_user_agent, HttpClientConfig};
use crate::table::ColumnConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Paged data source
    pub source: PageSource,

    /// Table columns (derived from the records when empty)
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl AppConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate a YAML (or JSON) document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config for values that cannot work
    pub fn validate(&self) -> Result<()> {
        self.http.validate()?;
        self.source.validate()?;

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.data_attribute.is_empty() {
                return Err(Error::invalid_value(
                    "columns",
                    format!("column '{}' has no data_attribute", column.header),
                ));
            }
            if !seen.insert(column.header.as_str()) {
                return Err(Error::invalid_value(
                    "columns",
                    format!("duplicate column header '{}'", column.header),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Base URL for relative endpoint URLs
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: BTreeMap::new(),
        }
    }
}

impl HttpSettings {
    /// Check the base URL and timeout
    pub fn validate(&self) -> Result<()> {
        if let Some(ref base) = self.base_url {
            url::Url::parse(base)?;
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "http.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Build the transport configuration
    pub fn to_client_config(&self) -> Result<HttpClientConfig> {
        self.validate()?;
        Ok(HttpClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            default_headers: self.headers.clone(),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        })
    }
}
