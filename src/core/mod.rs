//! Core domain: principals, org hierarchy and reporting

pub mod models;
pub mod org;
pub mod reports;
pub mod user_management;
