//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - AdminCredential entity, email value object, repository trait
//! - `application/` - Login and change-password use cases
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router, access policy, pipeline
//!
//! ## Features
//! - Single-owner login with email + password, answered with a bearer token
//! - Password rotation for the active admin credential
//! - Stateless authentication pipeline with route-based authorization
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; unknown emails run a dummy verify
//! - Tokens are HMAC-signed JWS; nothing is stored server-side
//! - `/v1/admin/**` requires the `ADMIN` role; other non-public routes
//!   require any valid token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialRepository, PgCredentialRepository};
pub use presentation::middleware::{AuthPipelineState, auth_pipeline};
pub use presentation::policy::AccessPolicy;
pub use presentation::router::auth_router_generic;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
