//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types, error codes and result aliases
//! - Response envelopes shared by every endpoint
//! - Common primitive value objects (ID types, audit columns, principals)
//! - Cross-cutting validation rules
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod code;
    pub mod conversions;
    pub mod kind;
    pub mod response;
}
pub mod audit;
#[cfg(feature = "axum")]
pub mod http;
pub mod id;
pub mod principal;
pub mod response;
pub mod validation;

pub use error::app_error::{AppError, AppResult};
pub use error::code::ErrorCode;
pub use error::kind::ErrorKind;
