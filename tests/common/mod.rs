//! Common test utilities for rbac-gateway

pub mod assertions;
pub mod fixtures;

pub use fixtures::{PrincipalFactory, account_records, seeded_directory, test_state};
