//! Integration tests over the public API

pub mod authorization_tests;
pub mod config_tests;
pub mod directory_tests;
pub mod http_tests;
