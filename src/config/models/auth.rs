//! Authentication and authorization configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl: u64,
    /// RBAC configuration
    #[serde(default)]
    pub rbac: RbacConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
            rbac: RbacConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.jwt_secret.is_empty() {
            self.jwt_secret = other.jwt_secret;
        }
        if other.access_token_ttl != default_access_token_ttl() {
            self.access_token_ttl = other.access_token_ttl;
        }
        if other.refresh_token_ttl != default_refresh_token_ttl() {
            self.refresh_token_ttl = other.refresh_token_ttl;
        }
        self.rbac = self.rbac.merge(other.rbac);
        self
    }
}

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Allow every operation unconditionally. Read once at startup.
    #[serde(default)]
    pub development_mode: bool,
    /// Populate the permission catalog and the Administrator role at startup
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Superuser created on first start when no account with this email exists
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            development_mode: false,
            seed_defaults: true,
            bootstrap_admin: None,
        }
    }
}

impl RbacConfig {
    /// Merge RBAC configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.development_mode {
            self.development_mode = other.development_mode;
        }
        if !other.seed_defaults {
            self.seed_defaults = other.seed_defaults;
        }
        if other.bootstrap_admin.is_some() {
            self.bootstrap_admin = other.bootstrap_admin;
        }
        self
    }
}

/// Initial superuser account
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about insecure configuration
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.rbac.development_mode {
        warn!(
            "Development mode is enabled: every operation is allowed without authorization checks. Never enable this in production."
        );
    }
}
