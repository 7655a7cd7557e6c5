//! Portfolio Error Types
//!
//! This module provides portfolio-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldErrors;
use thiserror::Error;

/// Portfolio-specific result type alias
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Portfolio-specific error variants
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Request body failed field validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Path parameter outside its vocabulary
    #[error("Invalid value '{value}' for parameter '{parameter}'")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
    },

    #[error("{resource} not found with id: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// No non-deleted profile row exists
    #[error("Owner profile has not been initialized")]
    OwnerProfileMissing,

    /// Uniqueness violated among non-deleted rows
    #[error("{resource} already exists with {field}: {value}")]
    Duplicate {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortfolioError {
    pub fn profile_not_found(id: impl Into<i64>) -> Self {
        PortfolioError::NotFound {
            resource: "Profile",
            id: id.into(),
        }
    }

    pub fn project_not_found(id: impl Into<i64>) -> Self {
        PortfolioError::NotFound {
            resource: "Project",
            id: id.into(),
        }
    }

    pub fn skill_not_found(id: impl Into<i64>) -> Self {
        PortfolioError::NotFound {
            resource: "Skill",
            id: id.into(),
        }
    }

    pub fn duplicate_project_title(title: impl Into<String>) -> Self {
        PortfolioError::Duplicate {
            resource: "Project",
            field: "title",
            value: title.into(),
        }
    }

    pub fn duplicate_skill_name(name: impl Into<String>) -> Self {
        PortfolioError::Duplicate {
            resource: "Skill",
            field: "name",
            value: name.into(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortfolioError::Validation(_) | PortfolioError::InvalidParameter { .. } => {
                ErrorKind::BadRequest
            }
            PortfolioError::NotFound { .. } | PortfolioError::OwnerProfileMissing => {
                ErrorKind::NotFound
            }
            PortfolioError::Duplicate { .. } => ErrorKind::Conflict,
            PortfolioError::Database(_) | PortfolioError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PortfolioError::Database(e) => {
                tracing::error!(error = %e, "Portfolio database error");
            }
            PortfolioError::Internal(msg) => {
                tracing::error!(message = %msg, "Portfolio internal error");
            }
            PortfolioError::OwnerProfileMissing => {
                tracing::warn!("Owner profile requested but none exists");
            }
            PortfolioError::Duplicate {
                resource, field, ..
            } => {
                tracing::info!(resource, field, "Duplicate resource rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Portfolio error");
            }
        }
    }
}

impl From<PortfolioError> for AppError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::Validation(errors) => AppError::validation(errors),
            PortfolioError::InvalidParameter { parameter, value } => {
                AppError::type_mismatch(value, parameter)
            }
            PortfolioError::Database(e) => AppError::from(e),
            PortfolioError::Internal(msg) => AppError::internal(msg),
            PortfolioError::Duplicate { .. } => AppError::conflict(err.to_string()),
            PortfolioError::NotFound { .. } | PortfolioError::OwnerProfileMissing => {
                AppError::not_found(err.to_string())
            }
        }
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<FieldErrors> for PortfolioError {
    fn from(errors: FieldErrors) -> Self {
        PortfolioError::Validation(errors)
    }
}
