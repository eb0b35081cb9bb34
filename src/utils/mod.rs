//! Shared utilities
//!
//! Error handling, credential hashing and logging setup used across the
//! gateway.

pub mod auth;
pub mod error;
pub mod logging;
