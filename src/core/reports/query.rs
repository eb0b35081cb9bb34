//! Filtering, ordering and pagination over account records

use crate::core::models::AccountRecord;
use crate::utils::error::{GatewayError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering applied when the caller does not ask for one
pub const DEFAULT_ORDERING: &str = "-report_date,-report_time";

/// Query parameters accepted by the account-base list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportQuery {
    /// Free text over account number, customer, phone, branch and product
    pub search: Option<String>,
    pub branch_code: Option<String>,
    pub branch_name: Option<String>,
    pub region: Option<String>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub product_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub cust_type: Option<String>,
    pub min_balance: Option<f64>,
    pub max_balance: Option<f64>,
    pub opened_after: Option<NaiveDate>,
    pub opened_before: Option<NaiveDate>,
    /// Comma separated fields, `-` prefix for descending
    pub ordering: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ReportQuery {
    pub fn matches(&self, record: &AccountRecord) -> bool {
        if let Some(term) = non_empty(&self.search) {
            let term = term.to_lowercase();
            let searchable = [
                Some(&record.account_number),
                record.customer_name.as_ref(),
                record.customer_no.as_ref(),
                record.phone_number.as_ref(),
                record.branch_name.as_ref(),
                record.product_name.as_ref(),
            ];
            if !searchable
                .iter()
                .flatten()
                .any(|value| value.to_lowercase().contains(&term))
            {
                return false;
            }
        }

        let exact = [
            (&self.branch_code, &record.branch_code),
            (&self.branch_name, &record.branch_name),
            (&self.region, &record.region),
            (&self.currency, &record.currency),
            (&self.category, &record.category),
            (&self.product_name, &record.product_name),
            (&self.sector, &record.sector),
            (&self.industry, &record.industry),
            (&self.cust_type, &record.cust_type),
        ];
        for (wanted, actual) in exact {
            if let Some(wanted) = non_empty(wanted) {
                if actual.as_deref() != Some(wanted) {
                    return false;
                }
            }
        }

        if self.min_balance.is_some_and(|min| record.balance() < min)
            || self.max_balance.is_some_and(|max| record.balance() > max)
        {
            return false;
        }

        if self.opened_after.is_some() || self.opened_before.is_some() {
            let Some(opened) = record.opening_date else {
                return false;
            };
            if self.opened_after.is_some_and(|after| opened < after)
                || self.opened_before.is_some_and(|before| opened > before)
            {
                return false;
            }
        }

        true
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Parsed ordering, falling back to the default
    pub fn sort_keys(&self) -> Result<Vec<SortKey>> {
        parse_ordering(non_empty(&self.ordering).unwrap_or(DEFAULT_ORDERING))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Field a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    AccountNumber,
    CustomerName,
    WorkingBalance,
    OpeningDate,
    ReportDate,
    ReportTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    fn compare(&self, a: &AccountRecord, b: &AccountRecord) -> Ordering {
        let ordering = match self.field {
            SortField::AccountNumber => a.account_number.cmp(&b.account_number),
            SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
            SortField::WorkingBalance => a.balance().total_cmp(&b.balance()),
            SortField::OpeningDate => a.opening_date.cmp(&b.opening_date),
            SortField::ReportDate => a.report_date.cmp(&b.report_date),
            SortField::ReportTime => a.report_time.cmp(&b.report_time),
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

pub fn parse_ordering(ordering: &str) -> Result<Vec<SortKey>> {
    ordering
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (descending, name) = match part.strip_prefix('-') {
                Some(name) => (true, name),
                None => (false, part),
            };
            let field = match name {
                "account_number" => SortField::AccountNumber,
                "customer_name" => SortField::CustomerName,
                "working_balance" => SortField::WorkingBalance,
                "opening_date" => SortField::OpeningDate,
                "report_date" => SortField::ReportDate,
                "report_time" => SortField::ReportTime,
                other => {
                    return Err(GatewayError::bad_request(format!(
                        "Cannot order by '{}'",
                        other
                    )));
                }
            };
            Ok(SortKey { field, descending })
        })
        .collect()
}

/// Stable sort by the keys, first key most significant
pub fn sort_records(records: &mut [AccountRecord], keys: &[SortKey]) {
    records.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

/// Page number and size requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Everything in a single page
    pub fn all(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            next: None,
            previous: None,
            results,
        }
    }

    /// Cut `items` into the requested page
    ///
    /// Links are relative to `path`. Asking for a page past the end fails
    /// with `NotFound`, except page 1 of an empty listing.
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize, path: &str) -> Result<Self> {
        if page == 0 || page_size == 0 {
            return Err(GatewayError::bad_request(
                "page and page_size must be positive",
            ));
        }

        let count = items.len();
        let start = (page - 1).saturating_mul(page_size);
        if start >= count && page > 1 {
            return Err(GatewayError::not_found("Invalid page"));
        }

        let link = |n: usize| format!("{}?page={}&page_size={}", path, n, page_size);
        let next = (start + page_size < count).then(|| link(page + 1));
        let previous = (page > 1).then(|| link(page - 1));

        let results = items.into_iter().skip(start).take(page_size).collect();
        Ok(Self {
            count,
            next,
            previous,
            results,
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
