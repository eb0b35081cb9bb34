//! Account-base reporting record

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One row of the read-only account-base view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_number: String,
    #[serde(default)]
    pub customer_no: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub sector_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub industry_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub working_balance: Option<f64>,
    #[serde(default)]
    pub opening_date: Option<NaiveDate>,
    #[serde(default)]
    pub branch_code: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub ultimate_ben: Option<String>,
    #[serde(default)]
    pub cust_type: Option<String>,
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    #[serde(default)]
    pub report_time: Option<NaiveTime>,
}

impl AccountRecord {
    /// Minimal record, mostly for fixtures
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            customer_no: None,
            customer_name: None,
            phone_number: None,
            category: None,
            product_name: None,
            sector: None,
            sector_name: None,
            industry: None,
            industry_name: None,
            currency: None,
            working_balance: None,
            opening_date: None,
            branch_code: None,
            branch_name: None,
            region: None,
            ultimate_ben: None,
            cust_type: None,
            report_date: None,
            report_time: None,
        }
    }

    pub fn balance(&self) -> f64 {
        self.working_balance.unwrap_or(0.0)
    }
}

/// Summary projection used by list endpoints
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub account_number: String,
    pub customer_name: Option<String>,
    pub working_balance: Option<f64>,
    pub currency: Option<String>,
    pub branch_name: Option<String>,
    pub product_name: Option<String>,
    pub opening_date: Option<NaiveDate>,
}

impl From<&AccountRecord> for AccountSummary {
    fn from(record: &AccountRecord) -> Self {
        Self {
            account_number: record.account_number.clone(),
            customer_name: record.customer_name.clone(),
            working_balance: record.working_balance,
            currency: record.currency.clone(),
            branch_name: record.branch_name.clone(),
            product_name: record.product_name.clone(),
            opening_date: record.opening_date,
        }
    }
}
