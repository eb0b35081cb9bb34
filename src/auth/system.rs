//! Core authentication system implementation

use crate::auth::credentials::{CredentialVerifier, DirectoryCredentials};
use crate::auth::jwt::{JwtHandler, TokenPair};
use crate::auth::policy::{DenyReason, Principal};
use crate::auth::session::SessionIssuer;
use crate::config::AuthConfig;
use crate::core::models::User;
use crate::core::user_management::NewUser;
use crate::storage::Directory;
use crate::utils::auth::crypto::{hash_password, validate_password_strength, verify_password};
use crate::utils::error::{GatewayError, Result};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Account request with a plain-text password
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub role: Option<Uuid>,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Authentication front door: logins, sessions and account credentials
#[derive(Clone)]
pub struct AuthSystem {
    directory: Arc<Directory>,
    credentials: Arc<dyn CredentialVerifier>,
    sessions: Arc<dyn SessionIssuer>,
}

impl std::fmt::Debug for AuthSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSystem").finish_non_exhaustive()
    }
}

impl AuthSystem {
    /// JWT sessions and argon2 credentials over the directory
    pub fn new(config: &AuthConfig, directory: Arc<Directory>) -> Self {
        info!("Initializing authentication system");

        let credentials = Arc::new(DirectoryCredentials::new(Arc::clone(&directory)));
        let sessions = Arc::new(JwtHandler::new(config));

        Self::with_collaborators(directory, credentials, sessions)
    }

    pub fn with_collaborators(
        directory: Arc<Directory>,
        credentials: Arc<dyn CredentialVerifier>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            directory,
            credentials,
            sessions,
        }
    }

    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    /// Verify credentials, stamp the login time and open a session
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair)> {
        let user = self.credentials.verify(email, password).await?;

        if let Err(e) = self.directory.record_login(user.id) {
            warn!("Failed to update last login time: {}", e);
        }
        let tokens = self.sessions.issue(user.id).await?;

        info!("User logged in: {}", user.email);
        Ok((self.directory.get_user(user.id)?, tokens))
    }

    /// Self-service sign up; never grants flags or a role
    pub async fn register(&self, account: NewAccount) -> Result<(User, TokenPair)> {
        let user = self.create_account(account, false)?;
        let tokens = self.sessions.issue(user.id).await?;
        info!("User registered: {}", user.email);
        Ok((user, tokens))
    }

    /// Hash the password and store the account
    ///
    /// Staff/superuser flags and the role survive only when `privileged`.
    pub fn create_account(&self, account: NewAccount, privileged: bool) -> Result<User> {
        validate_password_strength(&account.password)?;
        let password_hash = hash_password(&account.password)?;

        let mut new_user = NewUser::new(account.email, password_hash)
            .with_name(account.first_name, account.last_name);
        new_user.is_staff = account.is_staff;
        new_user.is_superuser = account.is_superuser;
        new_user.role = account.role;
        new_user.branch = account.branch;

        if !privileged && new_user.has_privileges() {
            debug!("Dropping privileged fields for {}", new_user.email);
            new_user = new_user.without_privileges();
        }

        let user = self.directory.create_user(new_user)?;
        info!("Created user {}", user.email);
        Ok(user)
    }

    /// Revoke the access token and, when given, the refresh token
    pub async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
        self.sessions.revoke(access_token).await?;
        if let Some(refresh_token) = refresh_token {
            self.sessions.revoke(refresh_token).await?;
        }
        debug!("Session closed");
        Ok(())
    }

    /// Trade a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let user_id = self.sessions.redeem(refresh_token).await?;
        let user = self
            .directory
            .get_user(user_id)
            .map_err(|_| GatewayError::auth("User no longer exists"))?;

        if !user.is_active {
            return Err(GatewayError::denied(DenyReason::Inactive));
        }
        self.sessions.issue(user.id).await
    }

    /// Current snapshot of the token's subject
    ///
    /// Inactive accounts still resolve; the engine turns them into
    /// `Deny(Inactive)`.
    pub async fn current_principal(&self, access_token: &str) -> Result<Principal> {
        let user_id = self.sessions.subject(access_token).await?;
        self.directory
            .principal(user_id)
            .ok_or_else(|| GatewayError::auth("User no longer exists"))
    }

    /// Replace a password after checking the old one
    pub fn change_password(&self, user_id: Uuid, old: &str, new: &str) -> Result<()> {
        let user = self.directory.get_user(user_id)?;
        if !verify_password(old, &user.password_hash)? {
            return Err(GatewayError::validation("Wrong password"));
        }
        validate_password_strength(new)?;

        self.directory.set_password_hash(user_id, hash_password(new)?)?;
        info!("Password changed for {}", user.email);
        Ok(())
    }
}
