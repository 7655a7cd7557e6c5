//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, access policy and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{ACCESS_DENIED_MESSAGE, AuthPipelineState, auth_pipeline};
pub use policy::{Access, AccessPolicy};
pub use router::auth_router_generic;
