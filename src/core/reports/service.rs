//! Account-base report operations

use super::query::{sort_records, Page, PageRequest, ReportQuery, SortField, SortKey};
use super::source::ReportSource;
use crate::config::ReportsConfig;
use crate::core::models::{AccountRecord, AccountSummary};
use crate::utils::error::{GatewayError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Base path of the account-base report routes
pub const ACCOUNT_BASE_PATH: &str = "/api/reports/account-base";
pub const DEFAULT_MIN_BALANCE: f64 = 100_000.0;
pub const DEFAULT_RECENT_LIMIT: usize = 100;

/// Count and balance for one group of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStat {
    pub name: Option<String>,
    pub count: usize,
    pub total_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_accounts: usize,
    pub total_balance: f64,
    pub average_balance: f64,
    pub by_branch: Vec<GroupStat>,
    pub by_product: Vec<GroupStat>,
    pub by_category: Vec<GroupStat>,
}

/// One exported row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub account_number: String,
    pub customer_name: String,
    pub customer_no: String,
    pub phone_number: String,
    pub working_balance: f64,
    pub currency: String,
    pub branch_name: String,
    pub product_name: String,
    pub category: String,
    pub sector: String,
    pub industry: String,
    pub opening_date: Option<NaiveDate>,
}

impl From<AccountRecord> for ExportRow {
    fn from(record: AccountRecord) -> Self {
        Self {
            working_balance: record.balance(),
            account_number: record.account_number,
            customer_name: record.customer_name.unwrap_or_default(),
            customer_no: record.customer_no.unwrap_or_default(),
            phone_number: record.phone_number.unwrap_or_default(),
            currency: record.currency.unwrap_or_default(),
            branch_name: record.branch_name.unwrap_or_default(),
            product_name: record.product_name.unwrap_or_default(),
            category: record.category.unwrap_or_default(),
            sector: record.sector.unwrap_or_default(),
            industry: record.industry.unwrap_or_default(),
            opening_date: record.opening_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub records: usize,
}

/// Derived views over a [`ReportSource`]
#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn ReportSource>,
    config: ReportsConfig,
}

impl ReportService {
    pub fn new(source: Arc<dyn ReportSource>, config: ReportsConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ReportsConfig {
        &self.config
    }

    /// Filtered, ordered and paginated listing
    pub async fn list(&self, query: &ReportQuery) -> Result<Page<AccountSummary>> {
        let records = self.source.query(query).await?;
        self.page(records, query.page_request(), ACCOUNT_BASE_PATH)
    }

    pub async fn retrieve(&self, account_number: &str) -> Result<AccountRecord> {
        self.source
            .find(account_number)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("Account {}", account_number)))
    }

    pub async fn stats(&self) -> Result<ReportStats> {
        let records = self.source.query(&ReportQuery::default()).await?;

        let total_accounts = records.len();
        let total_balance: f64 = records.iter().map(AccountRecord::balance).sum();
        let average_balance = if total_accounts == 0 {
            0.0
        } else {
            total_balance / total_accounts as f64
        };

        Ok(ReportStats {
            total_accounts,
            total_balance,
            average_balance,
            by_branch: group(&records, |r| r.branch_name.clone()),
            by_product: group(&records, |r| r.product_name.clone()),
            by_category: group(&records, |r| r.category.clone()),
        })
    }

    /// Accounts of one branch, by exact code or by name substring
    pub async fn by_branch(
        &self,
        branch_code: Option<&str>,
        branch_name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<AccountSummary>> {
        let mut query = ReportQuery::default();
        let branch_code = branch_code.map(str::trim).filter(|c| !c.is_empty());
        let branch_name = branch_name.map(str::trim).filter(|n| !n.is_empty());

        let records = match (branch_code, branch_name) {
            (Some(code), _) => {
                query.branch_code = Some(code.to_string());
                self.source.query(&query).await?
            }
            (None, Some(name)) => {
                let name = name.to_lowercase();
                self.source
                    .query(&query)
                    .await?
                    .into_iter()
                    .filter(|r| {
                        r.branch_name
                            .as_deref()
                            .is_some_and(|n| n.to_lowercase().contains(&name))
                    })
                    .collect()
            }
            (None, None) => {
                return Err(GatewayError::bad_request(
                    "Please provide branch_code or branch_name parameter",
                ));
            }
        };

        self.page(records, page, &format!("{}/by_branch", ACCOUNT_BASE_PATH))
    }

    /// Accounts at or above `min_balance`, largest first
    pub async fn high_balance(
        &self,
        min_balance: Option<f64>,
        page: PageRequest,
    ) -> Result<Page<AccountSummary>> {
        let min_balance = min_balance.unwrap_or(DEFAULT_MIN_BALANCE);
        if !min_balance.is_finite() {
            return Err(GatewayError::bad_request(
                "min_balance must be a valid number",
            ));
        }

        let query = ReportQuery {
            min_balance: Some(min_balance),
            ..ReportQuery::default()
        };
        let mut records = self.source.query(&query).await?;
        sort_records(&mut records, &[SortKey::desc(SortField::WorkingBalance)]);

        self.page(records, page, &format!("{}/high_balance", ACCOUNT_BASE_PATH))
    }

    /// Case-insensitive match on customer name, phone or customer number
    pub async fn search_customer(&self, q: &str, page: PageRequest) -> Result<Page<AccountSummary>> {
        let q = q.trim().to_lowercase();
        if q.is_empty() {
            return Err(GatewayError::bad_request(
                "Please provide search query (q parameter)",
            ));
        }

        let records: Vec<AccountRecord> = self
            .source
            .query(&ReportQuery::default())
            .await?
            .into_iter()
            .filter(|r| {
                [&r.customer_name, &r.phone_number, &r.customer_no]
                    .into_iter()
                    .flatten()
                    .any(|value| value.to_lowercase().contains(&q))
            })
            .collect();

        self.page(records, page, &format!("{}/search_customer", ACCOUNT_BASE_PATH))
    }

    /// Most recently opened accounts
    pub async fn recent_accounts(&self, limit: Option<usize>) -> Result<Vec<AccountSummary>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        let mut records = self.source.query(&ReportQuery::default()).await?;
        sort_records(&mut records, &[SortKey::desc(SortField::OpeningDate)]);

        Ok(records.iter().take(limit).map(AccountSummary::from).collect())
    }

    /// Rows for export, capped at the configured limit
    pub async fn export(&self, branch_code: Option<&str>) -> Result<Vec<ExportRow>> {
        let query = ReportQuery {
            branch_code: branch_code.map(str::to_string),
            ..ReportQuery::default()
        };
        let records = self.source.query(&query).await?;
        debug!(
            "Exporting {} of {} account record(s)",
            records.len().min(self.config.export_limit),
            records.len()
        );

        Ok(records
            .into_iter()
            .take(self.config.export_limit)
            .map(ExportRow::from)
            .collect())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".to_string(),
            records: self.source.count().await?,
        })
    }

    fn page(
        &self,
        records: Vec<AccountRecord>,
        request: PageRequest,
        path: &str,
    ) -> Result<Page<AccountSummary>> {
        let page = request.page.unwrap_or(1);
        let page_size = self.config.page_size(request.page_size);

        Ok(Page::paginate(records, page, page_size, path)?.map(|r| AccountSummary::from(&r)))
    }
}

/// Group by key, largest total balance first
fn group(records: &[AccountRecord], key: impl Fn(&AccountRecord) -> Option<String>) -> Vec<GroupStat> {
    let mut groups: HashMap<Option<String>, GroupStat> = HashMap::new();
    for record in records {
        let name = key(record);
        let stat = groups.entry(name.clone()).or_insert(GroupStat {
            name,
            count: 0,
            total_balance: 0.0,
        });
        stat.count += 1;
        stat.total_balance += record.balance();
    }

    let mut stats: Vec<GroupStat> = groups.into_values().collect();
    stats.sort_by(|a, b| {
        b.total_balance
            .total_cmp(&a.total_balance)
            .then_with(|| a.name.cmp(&b.name))
    });
    stats
}
