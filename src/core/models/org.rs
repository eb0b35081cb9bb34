//! Branch and department reference data

use crate::auth::policy::{AccessTarget, TargetOwner};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Branch (top of the org hierarchy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "branchCode")]
    pub code: String,
    #[serde(rename = "branchName")]
    pub name: String,
    /// User responsible for the branch
    #[serde(rename = "user", default)]
    pub manager: Option<Uuid>,
}

impl AccessTarget for Branch {
    fn target_owner(&self) -> TargetOwner {
        match self.manager {
            Some(manager) => TargetOwner::Owner(manager),
            None => TargetOwner::Unowned,
        }
    }
}

/// Department, always attached to an existing branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "departmentCode")]
    pub code: String,
    #[serde(rename = "departmentName")]
    pub name: String,
    /// Code of the owning branch
    pub branch: String,
}
