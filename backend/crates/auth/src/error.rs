//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
use kernel::principal::{UNAUTHENTICATED_MESSAGE, UnknownRole};
use kernel::validation::FieldErrors;
use platform::password::{PasswordHashError, PasswordPolicyError};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password or unusable stored hash
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    /// No active admin credential exists
    #[error("Admin credential not found")]
    CredentialNotFound,

    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("New password and confirmation do not match")]
    PasswordConfirmationMismatch,

    #[error("New password must be different from the current password")]
    PasswordUnchanged,

    /// Request body failed field validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// New password rejected by the password policy
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Bearer token rejected
    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    /// Token names a role this service does not know
    #[error("{0}")]
    UnknownRole(#[from] UnknownRole),

    /// Hashing failed (misconfiguration)
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::Token(_) | AuthError::UnknownRole(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::CredentialNotFound => ErrorKind::NotFound,
            AuthError::CurrentPasswordIncorrect
            | AuthError::PasswordConfirmationMismatch
            | AuthError::PasswordUnchanged
            | AuthError::Validation(_)
            | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::Hashing(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::CurrentPasswordIncorrect => {
                tracing::warn!("Password change rejected: current password mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        match err {
            AuthError::Validation(errors) => AppError::validation(errors),
            AuthError::PasswordPolicy(e) => {
                let mut errors = FieldErrors::new();
                errors.add("new_password", e.to_string());
                AppError::validation(errors)
            }
            AuthError::Token(e) => AppError::unauthorized(UNAUTHENTICATED_MESSAGE)
                .with_code(ErrorCode::Unauthorized)
                .with_source(e),
            AuthError::UnknownRole(e) => AppError::unauthorized(UNAUTHENTICATED_MESSAGE)
                .with_code(ErrorCode::Unauthorized)
                .with_source(e),
            AuthError::Database(e) => AppError::from(e),
            AuthError::Hashing(e) => AppError::internal("Password hashing failed").with_source(e),
            AuthError::Internal(msg) => AppError::internal(msg),
            business => AppError::business(kind, business.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        AuthError::Validation(errors)
    }
}
