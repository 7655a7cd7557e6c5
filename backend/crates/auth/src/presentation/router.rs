//! Auth Router
//!
//! Mounted under `/api/v1/auth`.

use axum::{
    Router,
    routing::{post, put},
};
use platform::password::PasswordHasher;
use platform::token::TokenService;
use std::sync::Arc;

use crate::domain::repository::CredentialRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(
    repo: R,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens,
        hasher,
    };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/change-password", put(handlers::change_password::<R>))
        .with_state(state)
}
