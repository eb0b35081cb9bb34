//! Shared store for permissions, roles, users and the org hierarchy

use crate::auth::policy::Principal;
use crate::auth::rbac::{
    seed_defaults, validate_code, Permission, PermissionCatalog, Role, RolePatch, RoleRegistry,
    SeedOutcome, ADMINISTRATOR_ROLE,
};
use crate::config::RbacConfig;
use crate::core::models::{Branch, Department, User};
use crate::core::org::{BranchPatch, DepartmentPatch, OrgDirectory};
use crate::core::user_management::{NewUser, UserPatch, UserTable};
use crate::utils::auth::crypto::hash_password;
use crate::utils::error::{GatewayError, Result};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default)]
struct DirectoryState {
    catalog: PermissionCatalog,
    roles: RoleRegistry,
    users: UserTable,
    org: OrgDirectory,
}

/// Resource data store
///
/// Every mutation runs under one write lock and validates all cross-entity
/// references before changing anything, so a failed call leaves the store
/// as it was. Reads return owned snapshots.
#[derive(Debug, Default)]
pub struct Directory {
    state: RwLock<DirectoryState>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed defaults and create the bootstrap superuser as configured
    pub fn bootstrap(&self, config: &RbacConfig) -> Result<Option<SeedOutcome>> {
        let outcome = if config.seed_defaults {
            Some(self.seed_defaults()?)
        } else {
            None
        };

        if let Some(admin) = &config.bootstrap_admin {
            if self.find_user_by_email(&admin.email).is_none() {
                let password_hash = hash_password(&admin.password)?;
                let mut new_user = NewUser::new(admin.email.clone(), password_hash)
                    .with_name(admin.first_name.clone(), admin.last_name.clone());
                new_user.is_staff = true;
                new_user.is_superuser = true;
                self.create_superuser(new_user)?;
            } else {
                debug!("Bootstrap admin {} already exists", admin.email);
            }
        }

        Ok(outcome)
    }

    /// Idempotent catalog and administrator role seeding
    pub fn seed_defaults(&self) -> Result<SeedOutcome> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let (_, outcome) = seed_defaults(&mut state.catalog, &mut state.roles)?;
        Ok(outcome)
    }

    fn create_superuser(&self, mut new_user: NewUser) -> Result<User> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        new_user.role = state.roles.find_by_name(ADMINISTRATOR_ROLE).map(|r| r.id);
        let user = state.users.create(new_user, &state.roles, &state.org)?;
        info!("Created bootstrap superuser {}", user.email);
        Ok(user)
    }

    // Permissions

    pub fn list_permissions(&self) -> Vec<Permission> {
        self.state
            .read()
            .catalog
            .list()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_permission(&self, code: &str) -> Result<Permission> {
        self.state.read().catalog.lookup(code).cloned()
    }

    /// Add a new permission; existing codes are rejected
    pub fn create_permission(
        &self,
        code: &str,
        display_name: &str,
        description: Option<String>,
    ) -> Result<Permission> {
        validate_code(code)?;
        if display_name.trim().is_empty() {
            return Err(GatewayError::validation("Permission name cannot be empty"));
        }

        let mut state = self.state.write();
        if state.catalog.exists(code) {
            return Err(GatewayError::DuplicateCode(code.to_string()));
        }
        state.catalog.define(code, display_name.trim());
        let permission = state.catalog.describe(code, description)?;
        info!("Created permission {}", code);
        Ok(permission)
    }

    /// Rename or re-describe a permission; the code itself never changes
    pub fn update_permission(
        &self,
        code: &str,
        display_name: Option<&str>,
        description: Option<String>,
    ) -> Result<Permission> {
        let mut state = self.state.write();
        let current = state.catalog.lookup(code)?.clone();

        let display_name = match display_name.map(str::trim) {
            Some("") => return Err(GatewayError::validation("Permission name cannot be empty")),
            Some(name) => name.to_string(),
            None => current.display_name,
        };
        state.catalog.define(code, &display_name);
        match description {
            Some(description) => state.catalog.describe(code, Some(description)),
            None => state.catalog.lookup(code).cloned(),
        }
    }

    pub fn remove_permission(&self, code: &str) -> Result<Permission> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.catalog.remove(code, &state.roles)
    }

    // Roles

    pub fn list_roles(&self) -> Vec<Role> {
        self.state.read().roles.list().into_iter().cloned().collect()
    }

    pub fn get_role(&self, role_id: Uuid) -> Result<Role> {
        self.state
            .read()
            .roles
            .get(role_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("Role {}", role_id)))
    }

    pub fn create_role(
        &self,
        name: &str,
        description: Option<String>,
        permission_codes: BTreeSet<String>,
    ) -> Result<Role> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state
            .roles
            .create(&state.catalog, name, description, permission_codes)
    }

    pub fn update_role(&self, role_id: Uuid, patch: RolePatch) -> Result<Role> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.roles.update(&state.catalog, role_id, patch)
    }

    pub fn grant(&self, role_id: Uuid, code: &str) -> Result<Role> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.roles.grant(&state.catalog, role_id, code)
    }

    pub fn revoke(&self, role_id: Uuid, code: &str) -> Result<Role> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.roles.revoke(&state.catalog, role_id, code)
    }

    pub fn delete_role(&self, role_id: Uuid) -> Result<Role> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.roles.delete(role_id, &state.users)
    }

    // Users

    pub fn list_users(&self) -> Vec<User> {
        self.state.read().users.list().into_iter().cloned().collect()
    }

    pub fn get_user(&self, user_id: Uuid) -> Result<User> {
        self.state
            .read()
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("User {}", user_id)))
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.state.read().users.find_by_email(email).cloned()
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.users.create(new_user, &state.roles, &state.org)
    }

    pub fn update_user(&self, user_id: Uuid, patch: UserPatch) -> Result<User> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.users.update(user_id, patch, &state.roles, &state.org)
    }

    /// Delete a user and detach it from the branches it manages
    pub fn delete_user(&self, user_id: Uuid) -> Result<User> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let user = state.users.delete(user_id)?;
        let cleared = state.org.clear_manager(user_id);
        if cleared > 0 {
            debug!("Cleared manager on {} branch(es)", cleared);
        }
        Ok(user)
    }

    pub fn set_password_hash(&self, user_id: Uuid, password_hash: String) -> Result<()> {
        self.state
            .write()
            .users
            .set_password_hash(user_id, password_hash)
    }

    pub fn record_login(&self, user_id: Uuid) -> Result<()> {
        self.state.write().users.record_login(user_id)
    }

    /// Effective permissions of a user, via its role
    pub fn user_permissions(&self, user: &User) -> BTreeSet<String> {
        let state = self.state.read();
        user.role
            .and_then(|id| state.roles.get(id))
            .map(|role| role.permission_codes.clone())
            .unwrap_or_default()
    }

    /// Snapshot of a user and its current role
    pub fn principal(&self, user_id: Uuid) -> Option<Principal> {
        let state = self.state.read();
        let user = state.users.get(user_id)?;
        let role = user.role.and_then(|id| state.roles.get(id));
        Some(Principal::from_user(user, role))
    }

    // Org hierarchy

    pub fn list_branches(&self) -> Vec<Branch> {
        self.state
            .read()
            .org
            .list_branches()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_branch(&self, code: &str) -> Result<Branch> {
        self.state
            .read()
            .org
            .get_branch(code)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("Branch {}", code)))
    }

    pub fn create_branch(&self, branch: Branch) -> Result<Branch> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.org.create_branch(branch, &state.users)
    }

    pub fn update_branch(&self, code: &str, patch: BranchPatch) -> Result<Branch> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.org.update_branch(code, patch, &state.users)
    }

    pub fn delete_branch(&self, code: &str) -> Result<Branch> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.org.delete_branch(code, &state.users)
    }

    pub fn list_departments(&self, branch: Option<&str>) -> Vec<Department> {
        self.state
            .read()
            .org
            .list_departments(branch)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_department(&self, code: &str) -> Result<Department> {
        self.state
            .read()
            .org
            .get_department(code)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("Department {}", code)))
    }

    pub fn create_department(&self, department: Department) -> Result<Department> {
        self.state.write().org.create_department(department)
    }

    pub fn update_department(&self, code: &str, patch: DepartmentPatch) -> Result<Department> {
        self.state.write().org.update_department(code, patch)
    }

    pub fn delete_department(&self, code: &str) -> Result<Department> {
        self.state.write().org.delete_department(code)
    }
}
