//! Identifier/secret verification

use crate::auth::policy::DenyReason;
use crate::core::models::User;
use crate::storage::Directory;
use crate::utils::auth::crypto::verify_password;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Checks a login identifier and secret against stored credentials
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return the matching account, `InvalidCredentials` on a mismatch, or
    /// `Denied(Inactive)` when the secret is right but the account is disabled
    async fn verify(&self, identifier: &str, secret: &str) -> Result<User>;
}

/// Argon2 verification over the directory's user table
#[derive(Debug, Clone)]
pub struct DirectoryCredentials {
    directory: Arc<Directory>,
}

impl DirectoryCredentials {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl CredentialVerifier for DirectoryCredentials {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<User> {
        let Some(user) = self.directory.find_user_by_email(identifier) else {
            warn!("Login attempt for unknown account: {}", identifier);
            return Err(GatewayError::InvalidCredentials);
        };

        if !verify_password(secret, &user.password_hash)? {
            warn!("Login attempt with invalid password for: {}", identifier);
            return Err(GatewayError::InvalidCredentials);
        }

        if !user.is_active {
            warn!("Login attempt for inactive account: {}", identifier);
            return Err(GatewayError::denied(DenyReason::Inactive));
        }

        Ok(user)
    }
}
