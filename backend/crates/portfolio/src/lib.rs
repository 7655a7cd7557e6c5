//! Portfolio Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Profile, Project and Skill entities, value objects, repository traits
//! - `application/` - Profile, project and skill services, read-path caches
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Data Model
//! - Every row carries audit columns; deletes are soft and deleted rows are
//!   invisible to every query
//! - Project titles and skill names are unique among non-deleted rows
//! - The lowest-id non-deleted profile is the owner profile
//!
//! ## Caching
//! - `profile`: `"owner"` and by-id keys, evicted on profile writes
//! - `projects`: every read; cleared entirely on any project write
//! - `skills`: by-id keys only, evicted on skill update and delete

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::PortfolioCaches;
pub use domain::repository::{
    PortfolioRepository, ProfileRepository, ProjectRepository, SkillRepository,
};
pub use error::{PortfolioError, PortfolioResult};
pub use infra::{InMemoryPortfolioRepository, PgPortfolioRepository};
pub use presentation::router::portfolio_router_generic;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
