//! RBAC type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Permission definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable identifier, e.g. `user.view`
    pub code: String,
    /// Human readable name
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    /// Unique role name
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Permissions granted by this role
    pub permission_codes: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        permission_codes: BTreeSet<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            permission_codes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Permission codes granted by the role, verbatim
    pub fn effective_permissions(&self) -> &BTreeSet<String> {
        &self.permission_codes
    }

    pub fn grants(&self, code: &str) -> bool {
        self.permission_codes.contains(code)
    }
}

/// Changes to a role; absent fields are left alone
///
/// `permission_codes`, when present, replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RolePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permission_codes: Option<BTreeSet<String>>,
}

impl RolePatch {
    pub fn permissions<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permission_codes: Some(codes.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.permission_codes.is_none()
    }
}
