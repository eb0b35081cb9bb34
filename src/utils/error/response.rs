//! HTTP response handling for errors

use super::types::GatewayError;
use crate::auth::policy::DenyReason;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl GatewayError {
    /// Status code and stable error code for this error
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            GatewayError::Serialization(_) | GatewayError::Yaml(_) => {
                (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR")
            }
            GatewayError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            GatewayError::Auth(_) | GatewayError::Jwt(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            GatewayError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            GatewayError::Crypto(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CRYPTO_ERROR"),
            GatewayError::Denied(reason) => match reason {
                DenyReason::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
                DenyReason::Inactive => (StatusCode::FORBIDDEN, "INACTIVE"),
                DenyReason::MissingPermission(_) => (StatusCode::FORBIDDEN, "MISSING_PERMISSION"),
                DenyReason::NotOwner => (StatusCode::FORBIDDEN, "NOT_OWNER"),
                DenyReason::MissingTarget => (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_TARGET"),
            },
            GatewayError::UnknownPermission(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_PERMISSION"),
            GatewayError::PermissionInUse { .. } => (StatusCode::CONFLICT, "PERMISSION_IN_USE"),
            GatewayError::UnknownBranch(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_BRANCH"),
            GatewayError::BranchInUse { .. } => (StatusCode::CONFLICT, "BRANCH_IN_USE"),
            GatewayError::DuplicateName(_) => (StatusCode::CONFLICT, "DUPLICATE_NAME"),
            GatewayError::DuplicateCode(_) => (StatusCode::CONFLICT, "DUPLICATE_CODE"),
            GatewayError::RoleInUse { .. } => (StatusCode::CONFLICT, "ROLE_IN_USE"),
            GatewayError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GatewayError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.classify();

        // Internal details stay in the logs
        let message = if status_code.is_server_error() {
            tracing::error!("{}", self);
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
