//! Request-time principal snapshot and ownership of target objects

use crate::auth::rbac::Role;
use crate::core::models::User;
use std::collections::HashSet;
use uuid::Uuid;

/// Immutable view of a user taken when a request is authorized
///
/// The effective permission set is copied from the assigned role at
/// snapshot time, so evaluation never touches shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub active: bool,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub role: Option<Uuid>,
    pub branch: Option<String>,
    permissions: HashSet<String>,
}

impl Principal {
    /// Active principal with no flags and no permissions
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            active: true,
            is_superuser: false,
            is_staff: false,
            role: None,
            branch: None,
            permissions: HashSet::new(),
        }
    }

    /// Snapshot a user together with its assigned role (if any)
    pub fn from_user(user: &User, role: Option<&Role>) -> Self {
        Self {
            id: user.id,
            active: user.is_active,
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
            role: role.map(|r| r.id),
            branch: user.branch.clone(),
            permissions: role
                .map(|r| r.permission_codes.iter().cloned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn with_permissions<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    pub fn staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Permissions granted through the assigned role
    pub fn effective_permissions(&self) -> &HashSet<String> {
        &self.permissions
    }

    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.contains(code)
    }
}

/// How a target object relates to principals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOwner {
    /// The object carries an owner reference
    Owner(Uuid),
    /// The object is itself a principal
    Identity(Uuid),
    /// Nobody owns the object
    Unowned,
}

impl TargetOwner {
    pub fn is_owned_by(&self, principal_id: Uuid) -> bool {
        match self {
            TargetOwner::Owner(owner) | TargetOwner::Identity(owner) => *owner == principal_id,
            TargetOwner::Unowned => false,
        }
    }
}

/// Object that can be the subject of an ownership check
pub trait AccessTarget {
    fn target_owner(&self) -> TargetOwner;
}

impl AccessTarget for TargetOwner {
    fn target_owner(&self) -> TargetOwner {
        *self
    }
}
