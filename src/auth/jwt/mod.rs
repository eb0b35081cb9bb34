//! JWT token handling
//!
//! This module provides JWT token creation, verification, and revocation.

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler, TokenPair, TokenType};
