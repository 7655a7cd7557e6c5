//! Authenticated principal
//!
//! A principal is built per request by the auth pipeline from a validated
//! bearer token and dropped with the request. Nothing is retained between
//! requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role carried by a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Portfolio owner; may use the admin surface
    #[default]
    Admin,
    /// Authenticated but without admin rights
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Parse a stored role code (case-insensitive)
    pub fn from_code(code: &str) -> Result<Self, UnknownRole> {
        match code.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(UnknownRole(code.to_string())),
        }
    }

    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The authenticated subject of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    role: Role,
}

impl Principal {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(feature = "axum")]
mod extract {
    use axum::extract::FromRequestParts;
    use axum::http::request::Parts;

    use super::Principal;
    use crate::error::app_error::AppError;

    /// Message used whenever a protected resource is hit without credentials
    pub const UNAUTHENTICATED_MESSAGE: &str =
        "Full authentication is required to access this resource";

    /// Reads the principal the auth pipeline stored in request extensions
    impl<S> FromRequestParts<S> for Principal
    where
        S: Send + Sync,
    {
        type Rejection = AppError;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .ok_or_else(|| AppError::unauthorized(UNAUTHENTICATED_MESSAGE))
        }
    }
}

#[cfg(feature = "axum")]
pub use extract::UNAUTHENTICATED_MESSAGE;
