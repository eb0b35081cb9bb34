//! Helper functions for creating specific error types

use super::types::GatewayError;
use crate::auth::policy::DenyReason;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn denied(reason: DenyReason) -> Self {
        Self::Denied(reason)
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    /// Whether the error is a data-integrity violation raised by a
    /// catalog, registry or org mutation
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownPermission(_)
                | Self::PermissionInUse { .. }
                | Self::UnknownBranch(_)
                | Self::BranchInUse { .. }
                | Self::DuplicateName(_)
                | Self::DuplicateCode(_)
                | Self::RoleInUse { .. }
        )
    }
}
