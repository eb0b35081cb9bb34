//! In-memory user table

use super::types::{NewUser, UserPatch};
use crate::auth::rbac::{RoleReferences, RoleRegistry};
use crate::core::models::User;
use crate::core::org::OrgDirectory;
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// Users keyed by id, with a case-insensitive email index
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    users: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user after checking email, role and branch
    pub fn create(
        &mut self,
        new_user: NewUser,
        roles: &RoleRegistry,
        org: &OrgDirectory,
    ) -> Result<User> {
        let email = normalize_email(&new_user.email)?;
        if self.by_email.contains_key(&email) {
            return Err(GatewayError::DuplicateName(email));
        }
        check_role(new_user.role, roles)?;
        check_branch(new_user.branch.as_deref(), org)?;

        let mut user = User::new(email.clone(), new_user.password_hash);
        user.first_name = new_user.first_name;
        user.last_name = new_user.last_name;
        user.is_active = new_user.is_active;
        user.is_staff = new_user.is_staff;
        user.is_superuser = new_user.is_superuser;
        user.role = new_user.role;
        user.branch = new_user.branch;

        info!("Created user {} ({})", user.email, user.id);
        self.by_email.insert(email, user.id);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Apply a patch; every reference is validated before anything changes
    pub fn update(
        &mut self,
        id: Uuid,
        patch: UserPatch,
        roles: &RoleRegistry,
        org: &OrgDirectory,
    ) -> Result<User> {
        let current = self.get(id).ok_or_else(|| user_not_found(id))?;

        let email = match &patch.email {
            Some(email) => {
                let email = normalize_email(email)?;
                if self.by_email.get(&email).is_some_and(|owner| *owner != id) {
                    return Err(GatewayError::DuplicateName(email));
                }
                Some(email)
            }
            None => None,
        };
        if let Some(role) = patch.role {
            check_role(role, roles)?;
        }
        if let Some(branch) = &patch.branch {
            check_branch(branch.as_deref(), org)?;
        }
        let old_email = current.email.clone();

        let user = self.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        if let Some(email) = email {
            self.by_email.remove(&old_email);
            self.by_email.insert(email.clone(), id);
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        if let Some(is_staff) = patch.is_staff {
            user.is_staff = is_staff;
        }
        if let Some(is_superuser) = patch.is_superuser {
            user.is_superuser = is_superuser;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(branch) = patch.branch {
            user.branch = branch;
        }

        Ok(user.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<User> {
        let user = self.users.remove(&id).ok_or_else(|| user_not_found(id))?;
        self.by_email.remove(&user.email);
        info!("Deleted user {}", user.email);
        Ok(user)
    }

    pub fn set_password_hash(&mut self, id: Uuid, password_hash: String) -> Result<()> {
        let user = self.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        user.password_hash = password_hash;
        Ok(())
    }

    pub fn record_login(&mut self, id: Uuid) -> Result<()> {
        let user = self.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        user.last_login = Some(Utc::now());
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.by_email
            .get(&email.trim().to_lowercase())
            .and_then(|id| self.users.get(id))
    }

    /// All users, oldest first
    pub fn list(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| {
            a.date_joined
                .cmp(&b.date_joined)
                .then_with(|| a.email.cmp(&b.email))
        });
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users attached to a branch
    pub fn count_in_branch(&self, code: &str) -> usize {
        self.users
            .values()
            .filter(|user| user.branch.as_deref() == Some(code))
            .count()
    }
}

impl RoleReferences for UserTable {
    fn principals_with_role(&self, role_id: Uuid) -> usize {
        self.users
            .values()
            .filter(|user| user.role == Some(role_id))
            .count()
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(GatewayError::validation(format!(
            "'{}' is not a valid email address",
            email
        ))),
    }
}

fn check_role(role: Option<Uuid>, roles: &RoleRegistry) -> Result<()> {
    match role {
        Some(id) if roles.get(id).is_none() => {
            Err(GatewayError::validation(format!("Unknown role {}", id)))
        }
        _ => Ok(()),
    }
}

fn check_branch(branch: Option<&str>, org: &OrgDirectory) -> Result<()> {
    match branch {
        Some(code) if !org.branch_exists(code) => Err(GatewayError::UnknownBranch(code.to_string())),
        _ => Ok(()),
    }
}

fn user_not_found(id: Uuid) -> GatewayError {
    GatewayError::not_found(format!("User {}", id))
}
