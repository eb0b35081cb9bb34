//! Read-only account record sources

use super::query::{sort_records, ReportQuery};
use crate::core::models::AccountRecord;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::info;

/// Read-only data source behind the account-base reports
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Records matching the query, ordered by it, not paginated
    async fn query(&self, query: &ReportQuery) -> Result<Vec<AccountRecord>>;

    async fn find(&self, account_number: &str) -> Result<Option<AccountRecord>>;

    async fn count(&self) -> Result<usize>;
}

/// Records held in memory, typically loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportSource {
    records: Vec<AccountRecord>,
}

impl InMemoryReportSource {
    pub fn new(records: Vec<AccountRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of records
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GatewayError::config(format!(
                "Failed to read report data {}: {}",
                path.display(),
                e
            ))
        })?;
        let records: Vec<AccountRecord> = serde_json::from_str(&content)?;

        info!("Loaded {} account record(s) from {}", records.len(), path.display());
        Ok(Self::new(records))
    }
}

#[async_trait]
impl ReportSource for InMemoryReportSource {
    async fn query(&self, query: &ReportQuery) -> Result<Vec<AccountRecord>> {
        let keys = query.sort_keys()?;
        let mut records: Vec<AccountRecord> = self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        sort_records(&mut records, &keys);
        Ok(records)
    }

    async fn find(&self, account_number: &str) -> Result<Option<AccountRecord>> {
        Ok(self
            .records
            .iter()
            .find(|record| record.account_number == account_number)
            .cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}
