//! User account (the principal's persisted form)

use crate::auth::policy::{AccessTarget, TargetOwner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Login identifier (unique, compared case-insensitively)
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Assigned role
    pub role: Option<Uuid>,
    /// Branch code of the user's org unit
    pub branch: Option<String>,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create an active, unprivileged user with no role
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: password_hash.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            role: None,
            branch: None,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether the account may see every other account
    pub fn sees_all_users(&self) -> bool {
        self.is_superuser || self.is_staff
    }
}

impl AccessTarget for User {
    fn target_owner(&self) -> TargetOwner {
        TargetOwner::Identity(self.id)
    }
}
