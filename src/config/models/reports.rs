//! Reporting data source configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// JSON file holding account-base records
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Page size used when the request does not set one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound for a requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    /// Maximum number of rows returned by an export
    #[serde(default = "default_export_limit")]
    pub export_limit: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            export_limit: default_export_limit(),
        }
    }
}

impl ReportsConfig {
    /// Requested page size, defaulted and capped
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }

    pub fn merge(mut self, other: Self) -> Self {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.default_page_size != default_page_size() {
            self.default_page_size = other.default_page_size;
        }
        if other.max_page_size != default_max_page_size() {
            self.max_page_size = other.max_page_size;
        }
        if other.export_limit != default_export_limit() {
            self.export_limit = other.export_limit;
        }
        self
    }
}
