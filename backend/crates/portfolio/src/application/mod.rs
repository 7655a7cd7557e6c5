//! Application Layer
//!
//! Domain services and the read-path cache wiring.

pub mod cache;
pub mod profile_service;
pub mod project_service;
pub mod skill_service;

pub use cache::{PortfolioCaches, ProjectsEntry};
pub use profile_service::ProfileService;
pub use project_service::ProjectService;
pub use skill_service::SkillService;
