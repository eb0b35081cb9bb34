//! Authentication helpers

pub mod crypto;
