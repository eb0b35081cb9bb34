//! Authentication configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use crate::utils::auth::crypto::password::MIN_PASSWORD_LENGTH;
use tracing::debug;

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating auth configuration");

        if self.jwt_secret.is_empty() {
            return Err("JWT secret cannot be empty".to_string());
        }

        if self.jwt_secret.len() < 32 {
            return Err("JWT secret should be at least 32 characters long".to_string());
        }

        if self.jwt_secret == "change-me" || self.jwt_secret == "your-secret-key" {
            return Err("JWT secret must not use default values".to_string());
        }

        if self.access_token_ttl < 60 {
            return Err("Access token lifetime should be at least 60 seconds".to_string());
        }

        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err("Refresh token lifetime must exceed the access token lifetime".to_string());
        }

        if self.refresh_token_ttl > 86400 * 30 {
            return Err("Refresh token lifetime should not exceed 30 days".to_string());
        }

        self.rbac.validate()?;

        Ok(())
    }
}

impl Validate for RbacConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(admin) = &self.bootstrap_admin {
            if !admin.email.contains('@') {
                return Err(format!("Bootstrap admin email is invalid: {}", admin.email));
            }
            if admin.password.chars().count() < MIN_PASSWORD_LENGTH {
                return Err(format!(
                    "Bootstrap admin password must be at least {} characters long",
                    MIN_PASSWORD_LENGTH
                ));
            }
        }

        Ok(())
    }
}
