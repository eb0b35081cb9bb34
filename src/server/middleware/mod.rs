//! Request helpers shared by the route handlers

pub mod helpers;

pub use helpers::extract_bearer_token;
