//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod auth;
pub mod gateway;
pub mod logging;
pub mod reports;
pub mod server;

pub use auth::*;
pub use gateway::*;
pub use logging::*;
pub use reports::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Access tokens live for one hour
pub fn default_access_token_ttl() -> u64 {
    3600
}

/// Refresh tokens live for one week
pub fn default_refresh_token_ttl() -> u64 {
    86400 * 7
}

pub fn default_page_size() -> usize {
    50
}

pub fn default_max_page_size() -> usize {
    500
}

pub fn default_export_limit() -> usize {
    1000
}

pub fn default_true() -> bool {
    true
}
