//! Core error type definitions

use crate::auth::policy::DenyReason;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Identifier/secret pair did not match any active account
    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Authorization engine denial
    #[error("Access denied: {0}")]
    Denied(DenyReason),

    /// Permission code not present in the catalog
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Permission still referenced by at least one role
    #[error("Permission {code} is referenced by {roles} role(s)")]
    PermissionInUse { code: String, roles: usize },

    /// Branch code not present in the org hierarchy
    #[error("Unknown branch: {0}")]
    UnknownBranch(String),

    /// Branch still referenced by departments or users
    #[error("Branch {code} is referenced by {departments} department(s) and {users} user(s)")]
    BranchInUse {
        code: String,
        departments: usize,
        users: usize,
    },

    /// Unique name already taken
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Unique code already taken
    #[error("Duplicate code: {0}")]
    DuplicateCode(String),

    /// Role still assigned to at least one principal
    #[error("Role {role} is assigned to {principals} user(s)")]
    RoleInUse { role: String, principals: usize },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
