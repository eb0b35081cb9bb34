//! Role-Based Access Control (RBAC) data model
//!
//! Permission catalog, role registry and the default seed data.

mod catalog;
pub mod codes;
mod registry;
mod seed;
mod types;

// Re-export public types and structs
pub use catalog::{validate_code, PermissionCatalog};
pub use registry::{RoleReferences, RoleRegistry};
pub use seed::{seed_defaults, SeedOutcome, ADMINISTRATOR_DESCRIPTION, ADMINISTRATOR_ROLE};
pub use types::{Permission, Role, RolePatch};
