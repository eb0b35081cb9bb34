//! Branch and department store

use super::types::{BranchPatch, DepartmentPatch};
use crate::core::models::{Branch, Department};
use crate::core::user_management::UserTable;
use crate::utils::error::{GatewayError, Result};
use std::collections::BTreeMap;
use tracing::info;

/// Branches and their departments, keyed by code
#[derive(Debug, Clone, Default)]
pub struct OrgDirectory {
    branches: BTreeMap<String, Branch>,
    departments: BTreeMap<String, Department>,
}

impl OrgDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_branch(&mut self, branch: Branch, users: &UserTable) -> Result<Branch> {
        let code = require_text("Branch code", &branch.code)?;
        let name = require_text("Branch name", &branch.name)?;
        if self.branches.contains_key(&code) {
            return Err(GatewayError::DuplicateCode(code));
        }
        check_manager(branch.manager, users)?;

        let branch = Branch {
            code: code.clone(),
            name,
            manager: branch.manager,
        };
        info!("Created branch {}", code);
        self.branches.insert(code, branch.clone());
        Ok(branch)
    }

    pub fn update_branch(
        &mut self,
        code: &str,
        patch: BranchPatch,
        users: &UserTable,
    ) -> Result<Branch> {
        if !self.branch_exists(code) {
            return Err(branch_not_found(code));
        }
        let name = patch
            .name
            .as_deref()
            .map(|name| require_text("Branch name", name))
            .transpose()?;
        if let Some(manager) = patch.manager {
            check_manager(manager, users)?;
        }

        let branch = self
            .branches
            .get_mut(code)
            .ok_or_else(|| branch_not_found(code))?;
        if let Some(name) = name {
            branch.name = name;
        }
        if let Some(manager) = patch.manager {
            branch.manager = manager;
        }
        Ok(branch.clone())
    }

    /// Delete a branch nothing refers to
    pub fn delete_branch(&mut self, code: &str, users: &UserTable) -> Result<Branch> {
        if !self.branch_exists(code) {
            return Err(branch_not_found(code));
        }

        let departments = self.list_departments(Some(code)).len();
        let users = users.count_in_branch(code);
        if departments > 0 || users > 0 {
            return Err(GatewayError::BranchInUse {
                code: code.to_string(),
                departments,
                users,
            });
        }

        info!("Deleted branch {}", code);
        self.branches
            .remove(code)
            .ok_or_else(|| branch_not_found(code))
    }

    /// Detach a user from every branch it manages
    pub fn clear_manager(&mut self, user_id: uuid::Uuid) -> usize {
        let mut cleared = 0;
        for branch in self.branches.values_mut() {
            if branch.manager == Some(user_id) {
                branch.manager = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn branch_exists(&self, code: &str) -> bool {
        self.branches.contains_key(code)
    }

    pub fn get_branch(&self, code: &str) -> Option<&Branch> {
        self.branches.get(code)
    }

    /// All branches ordered by code
    pub fn list_branches(&self) -> Vec<&Branch> {
        self.branches.values().collect()
    }

    pub fn create_department(&mut self, department: Department) -> Result<Department> {
        let code = require_text("Department code", &department.code)?;
        let name = require_text("Department name", &department.name)?;
        if !self.branch_exists(&department.branch) {
            return Err(GatewayError::UnknownBranch(department.branch));
        }
        if self.departments.contains_key(&code) {
            return Err(GatewayError::DuplicateCode(code));
        }

        let department = Department {
            code: code.clone(),
            name,
            branch: department.branch,
        };
        info!("Created department {} in branch {}", code, department.branch);
        self.departments.insert(code, department.clone());
        Ok(department)
    }

    pub fn update_department(&mut self, code: &str, patch: DepartmentPatch) -> Result<Department> {
        if !self.departments.contains_key(code) {
            return Err(department_not_found(code));
        }
        let name = patch
            .name
            .as_deref()
            .map(|name| require_text("Department name", name))
            .transpose()?;
        if let Some(branch) = &patch.branch {
            if !self.branch_exists(branch) {
                return Err(GatewayError::UnknownBranch(branch.clone()));
            }
        }

        let department = self
            .departments
            .get_mut(code)
            .ok_or_else(|| department_not_found(code))?;
        if let Some(name) = name {
            department.name = name;
        }
        if let Some(branch) = patch.branch {
            department.branch = branch;
        }
        Ok(department.clone())
    }

    pub fn delete_department(&mut self, code: &str) -> Result<Department> {
        let department = self
            .departments
            .remove(code)
            .ok_or_else(|| department_not_found(code))?;
        info!("Deleted department {}", code);
        Ok(department)
    }

    pub fn get_department(&self, code: &str) -> Option<&Department> {
        self.departments.get(code)
    }

    /// Departments ordered by code, optionally limited to one branch
    pub fn list_departments(&self, branch: Option<&str>) -> Vec<&Department> {
        self.departments
            .values()
            .filter(|department| branch.is_none_or(|code| department.branch == code))
            .collect()
    }
}

fn require_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GatewayError::validation(format!("{} cannot be empty", field)));
    }
    Ok(value.to_string())
}

fn check_manager(manager: Option<uuid::Uuid>, users: &UserTable) -> Result<()> {
    match manager {
        Some(id) if users.get(id).is_none() => {
            Err(GatewayError::validation(format!("Unknown user {}", id)))
        }
        _ => Ok(()),
    }
}

fn branch_not_found(code: &str) -> GatewayError {
    GatewayError::not_found(format!("Branch {}", code))
}

fn department_not_found(code: &str) -> GatewayError {
    GatewayError::not_found(format!("Department {}", code))
}
