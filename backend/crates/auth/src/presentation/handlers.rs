//! HTTP Handlers

use std::sync::Arc;

use axum::extract::State;
use kernel::audit::Actor;
use kernel::http::Json;
use kernel::principal::Principal;
use kernel::response::ApiResponse;
use platform::password::PasswordHasher;
use platform::token::TokenService;

use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
};
use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{ChangePasswordRequest, LoginRequest, LoginResponse};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<PasswordHasher>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<ApiResponse<LoginResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.hasher.clone(),
    );

    let input = LoginInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok(ApiResponse::success_with_message(
        LOGIN_SUCCESS_MESSAGE,
        LoginResponse::from(output),
    ))
}

// ============================================================================
// Change Password
// ============================================================================

/// PUT /api/v1/auth/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<ApiResponse<()>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.hasher.clone());

    let input = ChangePasswordInput {
        current_password: req.current_password.unwrap_or_default(),
        new_password: req.new_password.unwrap_or_default(),
        confirm_password: req.confirm_password.unwrap_or_default(),
    };

    use_case.execute(input, &Actor::from(&principal)).await?;

    Ok(ApiResponse::<()>::message(PASSWORD_CHANGED_MESSAGE))
}
