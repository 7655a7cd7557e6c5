//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{AdminCredential, NewAdminCredential};
pub use repository::{CredentialRepository, LocalCredentialRepository};
pub use value_object::Email;
