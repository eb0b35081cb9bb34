//! Patch types for the org hierarchy

use crate::core::user_management::nullable;
use serde::Deserialize;
use uuid::Uuid;

/// Changes to a branch; the code is immutable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchPatch {
    #[serde(default, rename = "branchName")]
    pub name: Option<String>,
    /// `null` removes the manager
    #[serde(default, rename = "user", deserialize_with = "nullable")]
    pub manager: Option<Option<Uuid>>,
}

/// Changes to a department; the code is immutable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentPatch {
    #[serde(default, rename = "departmentName")]
    pub name: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}
