//! Read-only account-base reporting

mod query;
mod service;
mod source;

pub use query::{parse_ordering, Page, PageRequest, ReportQuery, SortField, SortKey, DEFAULT_ORDERING};
pub use service::{
    ExportRow, GroupStat, HealthStatus, ReportService, ReportStats, ACCOUNT_BASE_PATH,
    DEFAULT_MIN_BALANCE, DEFAULT_RECENT_LIMIT,
};
pub use source::{InMemoryReportSource, ReportSource};
