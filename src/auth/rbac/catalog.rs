//! Permission catalog

use super::codes;
use super::registry::RoleRegistry;
use super::types::Permission;
use crate::utils::error::{GatewayError, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Named permission definitions keyed by code
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    permissions: BTreeMap<String, Permission>,
}

impl PermissionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a permission, or update the display name of an existing one
    pub fn define(&mut self, code: &str, display_name: &str) -> Permission {
        let permission = self
            .permissions
            .entry(code.to_string())
            .and_modify(|existing| existing.display_name = display_name.to_string())
            .or_insert_with(|| {
                debug!("Defining permission {}", code);
                Permission {
                    code: code.to_string(),
                    display_name: display_name.to_string(),
                    description: None,
                }
            });
        permission.clone()
    }

    /// Replace the description of an existing permission
    pub fn describe(&mut self, code: &str, description: Option<String>) -> Result<Permission> {
        let permission = self
            .permissions
            .get_mut(code)
            .ok_or_else(|| GatewayError::not_found(format!("Permission {}", code)))?;
        permission.description = description;
        Ok(permission.clone())
    }

    pub fn exists(&self, code: &str) -> bool {
        self.permissions.contains_key(code)
    }

    pub fn lookup(&self, code: &str) -> Result<&Permission> {
        self.permissions
            .get(code)
            .ok_or_else(|| GatewayError::not_found(format!("Permission {}", code)))
    }

    /// All permissions ordered by code
    pub fn list(&self) -> Vec<&Permission> {
        self.permissions.values().collect()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Fail with `UnknownPermission` on the first code not in the catalog
    pub fn ensure_known<'a, I>(&self, codes: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a String>,
    {
        match codes.into_iter().find(|code| !self.exists(code)) {
            Some(code) => Err(GatewayError::UnknownPermission(code.clone())),
            None => Ok(()),
        }
    }

    /// Remove a permission no role references
    pub fn remove(&mut self, code: &str, roles: &RoleRegistry) -> Result<Permission> {
        if !self.exists(code) {
            return Err(GatewayError::not_found(format!("Permission {}", code)));
        }

        let referencing = roles.count_referencing(code);
        if referencing > 0 {
            return Err(GatewayError::PermissionInUse {
                code: code.to_string(),
                roles: referencing,
            });
        }

        info!("Removing permission {}", code);
        self.permissions
            .remove(code)
            .ok_or_else(|| GatewayError::not_found(format!("Permission {}", code)))
    }

    /// Define every canonical permission; returns how many were new
    pub fn seed_canonical(&mut self) -> usize {
        let before = self.len();
        for (code, display_name) in codes::ALL {
            self.define(code, display_name);
        }
        self.len() - before
    }
}

/// Reject codes that do not follow the `resource.action` scheme
pub fn validate_code(code: &str) -> Result<()> {
    if codes::is_well_formed(code) {
        Ok(())
    } else {
        Err(GatewayError::validation(format!(
            "Permission code '{}' must look like resource.action",
            code
        )))
    }
}
