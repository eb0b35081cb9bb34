//! Role registry

use super::catalog::PermissionCatalog;
use super::types::{Role, RolePatch};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};
use uuid::Uuid;

/// Answers how many principals currently hold a role
pub trait RoleReferences {
    fn principals_with_role(&self, role_id: Uuid) -> usize;
}

/// Named roles, each holding a set of permission codes
///
/// Every mutation validates against the catalog before touching the role,
/// so a failed call leaves the registry unchanged.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: HashMap<Uuid, Role>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        catalog: &PermissionCatalog,
        name: &str,
        description: Option<String>,
        permission_codes: BTreeSet<String>,
    ) -> Result<Role> {
        let name = validate_name(name)?;
        if self.find_by_name(&name).is_some() {
            return Err(GatewayError::DuplicateName(name));
        }
        catalog.ensure_known(&permission_codes)?;

        let role = Role::new(name, description, permission_codes);
        info!(
            "Created role {} with {} permission(s)",
            role.name,
            role.permission_codes.len()
        );
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    /// Apply a patch; a present permission set replaces the old one wholesale
    pub fn update(
        &mut self,
        catalog: &PermissionCatalog,
        role_id: Uuid,
        patch: RolePatch,
    ) -> Result<Role> {
        if !self.roles.contains_key(&role_id) {
            return Err(role_not_found(role_id));
        }

        let name = match &patch.name {
            Some(name) => {
                let name = validate_name(name)?;
                if self
                    .find_by_name(&name)
                    .is_some_and(|other| other.id != role_id)
                {
                    return Err(GatewayError::DuplicateName(name));
                }
                Some(name)
            }
            None => None,
        };
        if let Some(codes) = &patch.permission_codes {
            catalog.ensure_known(codes)?;
        }

        let role = self
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| role_not_found(role_id))?;
        if let Some(name) = name {
            role.name = name;
        }
        if let Some(description) = patch.description {
            role.description = Some(description);
        }
        if let Some(codes) = patch.permission_codes {
            role.permission_codes = codes;
        }
        role.updated_at = Utc::now();

        debug!("Updated role {}", role.name);
        Ok(role.clone())
    }

    /// Add one permission code to a role
    pub fn grant(&mut self, catalog: &PermissionCatalog, role_id: Uuid, code: &str) -> Result<Role> {
        let mut codes = self.permission_set(role_id)?;
        codes.insert(code.to_string());
        self.update(catalog, role_id, RolePatch::permissions(codes))
    }

    /// Remove one permission code from a role
    pub fn revoke(&mut self, catalog: &PermissionCatalog, role_id: Uuid, code: &str) -> Result<Role> {
        let mut codes = self.permission_set(role_id)?;
        codes.remove(code);
        self.update(catalog, role_id, RolePatch::permissions(codes))
    }

    /// Delete a role nobody holds
    pub fn delete(&mut self, role_id: Uuid, references: &impl RoleReferences) -> Result<Role> {
        let role = self.get(role_id).ok_or_else(|| role_not_found(role_id))?;

        let principals = references.principals_with_role(role_id);
        if principals > 0 {
            return Err(GatewayError::RoleInUse {
                role: role.name.clone(),
                principals,
            });
        }

        let role = self
            .roles
            .remove(&role_id)
            .ok_or_else(|| role_not_found(role_id))?;
        info!("Deleted role {}", role.name);
        Ok(role)
    }

    pub fn get(&self, role_id: Uuid) -> Option<&Role> {
        self.roles.get(&role_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.values().find(|role| role.name == name)
    }

    /// All roles ordered by name
    pub fn list(&self) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self.roles.values().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn effective_permissions(&self, role_id: Uuid) -> Result<BTreeSet<String>> {
        self.permission_set(role_id)
    }

    /// Number of roles granting a code
    pub fn count_referencing(&self, code: &str) -> usize {
        self.roles.values().filter(|role| role.grants(code)).count()
    }

    fn permission_set(&self, role_id: Uuid) -> Result<BTreeSet<String>> {
        self.get(role_id)
            .map(|role| role.permission_codes.clone())
            .ok_or_else(|| role_not_found(role_id))
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GatewayError::validation("Role name cannot be empty"));
    }
    if name.len() > 100 {
        return Err(GatewayError::validation(
            "Role name cannot exceed 100 characters",
        ));
    }
    Ok(name.to_string())
}

fn role_not_found(role_id: Uuid) -> GatewayError {
    GatewayError::not_found(format!("Role {}", role_id))
}
