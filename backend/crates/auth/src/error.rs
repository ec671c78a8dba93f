//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shown for every rejected protected request.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized - Please log in";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately one variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    EmailTaken,

    /// No session, or the session expired / was destroyed
    #[error("Unauthorized - Please log in")]
    SessionInvalid,

    /// Authenticated, but the record belongs to someone else
    #[error("Forbidden: You don't own this resource")]
    NotOwner,

    /// Ownership loader found nothing
    #[error("Resource not found")]
    ResourceNotFound,

    /// Principal's role is not in the allowed set
    #[error("Forbidden: Requires one of these roles: {0}")]
    InsufficientRole(String),

    /// Required body fields absent or empty
    #[error("{} are required", .0.join(" and "))]
    MissingFields(Vec<&'static str>),

    /// Field present but unusable (bad email shape, empty password)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session or credential store failure reported by a non-SQL backend
    #[error("Session store error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::NotOwner | AuthError::InsufficientRole(_) => ErrorKind::Forbidden,
            AuthError::ResourceNotFound => ErrorKind::NotFound,
            AuthError::MissingFields(_) | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(e) => classify_sqlx(e).0,
            AuthError::Store(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Store(msg) => {
                tracing::error!(message = %msg, "Auth session store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::NotOwner | AuthError::InsufficientRole(_) => {
                tracing::warn!(error = %self, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
