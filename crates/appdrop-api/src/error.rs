use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use appdrop_core::DomainError;

use crate::response::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingTenantKey => ApiError::Validation(err.to_string()),
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::TenantNotFound(_) | DomainError::TenantContextMissing => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::Unauthorized | DomainError::InvalidCredentials => {
                ApiError::Unauthorized(err.to_string())
            }
            DomainError::Forbidden => ApiError::Forbidden(err.to_string()),
            DomainError::TenantDomainAlreadyExists(_) => {
                ApiError::Conflict("brand domain already exists".to_string())
            }
            DomainError::TenantEmailAlreadyExists(_) => {
                ApiError::Conflict("brand email already exists".to_string())
            }
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => {
                tracing::debug!(status = status.as_u16(), code, "Request failed: {}", msg);
                msg
            }
        };

        (status, Json(ErrorResponse::new(code, &message))).into_response()
    }
}
