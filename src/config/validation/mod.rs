//! Configuration validation
//!
//! Each configuration section implements [`Validate`]; `Config::validate`
//! runs them in order and reports the first failure.

mod auth_validators;
mod server_validators;
mod trait_def;

pub use trait_def::Validate;
