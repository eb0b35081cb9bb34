//! Authentication and authorization
//!
//! `policy` holds the pure authorization engine and the endpoint binding
//! table, `rbac` the permission catalog and role registry, and the rest the
//! login/session collaborators that produce principals.

pub mod credentials;
pub mod jwt;
pub mod policy;
pub mod rbac;
pub mod session;
mod system;

#[cfg(test)]
mod tests;

pub use credentials::{CredentialVerifier, DirectoryCredentials};
pub use session::SessionIssuer;
pub use system::{AuthSystem, NewAccount};
