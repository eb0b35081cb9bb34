//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use chrono::NaiveDate;
use rbac_gateway::Principal;
use rbac_gateway::auth::AuthSystem;
use rbac_gateway::config::Config;
use rbac_gateway::core::models::AccountRecord;
use rbac_gateway::core::reports::{InMemoryReportSource, ReportService};
use rbac_gateway::server::{AppState, Dispatcher};
use rbac_gateway::storage::Directory;
use std::sync::Arc;
use uuid::Uuid;

/// Factory for request-time principals
pub struct PrincipalFactory;

impl PrincipalFactory {
    /// Active principal holding exactly `codes`
    pub fn with(codes: &[&str]) -> Principal {
        Principal::new(Uuid::new_v4()).with_permissions(codes.iter().copied())
    }

    pub fn plain() -> Principal {
        Self::with(&[])
    }

    pub fn staff() -> Principal {
        Self::plain().staff()
    }

    pub fn superuser() -> Principal {
        Self::plain().superuser()
    }
}

/// Directory with the canonical catalog and the Administrator role
pub fn seeded_directory() -> Directory {
    let directory = Directory::new();
    directory
        .seed_defaults()
        .expect("seeding an empty directory succeeds");
    directory
}

/// A handful of accounts across two branches
pub fn account_records() -> Vec<AccountRecord> {
    let rows = [
        ("1001", "Abebe Kebede", "001", "Head Office", "Savings", 250_000.0, (2023, 1, 10)),
        ("1002", "Sara Tesfaye", "001", "Head Office", "Current", 50_000.0, (2024, 3, 5)),
        ("2001", "Hana Girma", "002", "Harbour Branch", "Savings", 120_000.0, (2022, 7, 21)),
    ];

    rows.into_iter()
        .map(|(number, name, code, branch, product, balance, (y, m, d))| {
            let mut record = AccountRecord::new(number);
            record.customer_name = Some(name.to_string());
            record.branch_code = Some(code.to_string());
            record.branch_name = Some(branch.to_string());
            record.product_name = Some(product.to_string());
            record.category = Some("Retail".to_string());
            record.working_balance = Some(balance);
            record.opening_date = NaiveDate::from_ymd_opt(y, m, d);
            record
        })
        .collect()
}

/// Application state over a seeded directory and [`account_records`]
pub fn test_state(development_mode: bool) -> AppState {
    let mut config = Config::default();
    config.gateway.auth.rbac.development_mode = development_mode;

    let directory = Arc::new(seeded_directory());
    let reports = ReportService::new(
        Arc::new(InMemoryReportSource::new(account_records())),
        config.reports().clone(),
    );
    let auth = AuthSystem::new(config.auth(), Arc::clone(&directory));
    let dispatcher = Dispatcher::standard(development_mode);

    AppState::new(config, auth, directory, reports, dispatcher)
}
