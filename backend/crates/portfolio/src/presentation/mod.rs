//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PortfolioAppState;
pub use router::portfolio_router_generic;
