//! Input types for user management

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Data for a new user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub role: Option<Uuid>,
    pub branch: Option<String>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: password_hash.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            role: None,
            branch: None,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn with_role(mut self, role: Uuid) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Drop the flags and role only a superuser may set
    pub fn without_privileges(mut self) -> Self {
        self.is_staff = false;
        self.is_superuser = false;
        self.role = None;
        self
    }

    pub fn has_privileges(&self) -> bool {
        self.is_staff || self.is_superuser || self.role.is_some()
    }
}

/// Changes to a user; absent fields are left alone
///
/// `role` and `branch` distinguish "absent" from an explicit `null`, which
/// clears the reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub role: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    pub branch: Option<Option<String>>,
}

impl UserPatch {
    /// Whether the patch changes status flags or the role assignment
    pub fn touches_privileged_fields(&self) -> bool {
        self.is_staff.is_some()
            || self.is_superuser.is_some()
            || self.is_active.is_some()
            || self.role.is_some()
    }
}

/// Present-but-null becomes `Some(None)`
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
