//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::TokenError;

/// Coarse error classification used by the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    Validation,
    /// Duplicate login
    Conflict,
    /// Unknown user, wrong password, bad or missing token
    Authentication,
    /// Persistence or signing failure
    Dependency,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("unauthorized")]
    Unauthorized,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid password")]
    InvalidPassword,

    #[error(transparent)]
    Token(#[from] TokenError),

    // Input
    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("minimum price cannot be higher than the maximum")]
    InvalidPriceRange,

    // External service errors
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::InvalidPriceRange => ErrorKind::Validation,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Unauthorized | AppError::UserNotFound | AppError::InvalidPassword => {
                ErrorKind::Authentication
            }
            AppError::Token(TokenError::Signing(_)) => ErrorKind::Dependency,
            AppError::Token(_) => ErrorKind::Authentication,
            AppError::Database(_) | AppError::Internal(_) => ErrorKind::Dependency,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::InvalidPassword => "INVALID_PASSWORD",
            AppError::Token(TokenError::Signing(_)) => "TOKEN_ERROR",
            AppError::Token(_) => "INVALID_TOKEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidPriceRange => "INVALID_RANGE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Dependency => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message.
    ///
    /// Token failures collapse into one generic message so a client cannot
    /// learn which check rejected its token.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized => "missing or invalid Authorization header".to_string(),
            AppError::Token(TokenError::Signing(_)) => {
                tracing::error!("Token error: {}", self);
                "token error".to_string()
            }
            AppError::Token(_) => "invalid or expired token".to_string(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                self.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                self.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_by_kind() {
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidPriceRange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("user login").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UserNotFound.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Token(TokenError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Token(TokenError::Signing("no key".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_message() {
        let err = AppError::conflict("user login");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.user_message(), "user login already exists");
    }

    #[test]
    fn test_token_failures_share_generic_message() {
        let messages: Vec<String> = [
            TokenError::InvalidSignature,
            TokenError::Malformed,
            TokenError::Expired,
            TokenError::InvalidClaims,
        ]
        .into_iter()
        .map(|e| AppError::Token(e).user_message())
        .collect();

        assert!(messages.iter().all(|m| m == "invalid or expired token"));
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::validation("title must be 3-100 characters");
        assert_eq!(err.user_message(), "title must be 3-100 characters");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
