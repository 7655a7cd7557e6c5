//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod login;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase, TOKEN_TYPE};
