//! Authentication & Authorization Pipeline
//!
//! Runs on every request:
//! 1. `OPTIONS` passes straight through (CORS preflight)
//! 2. Bearer token extraction from `Authorization`
//! 3. Token validation and principal construction
//! 4. Route-based authorization via [`AccessPolicy`]
//!
//! A valid principal is stored in request extensions for the
//! `kernel::principal::Principal` extractor. Nothing outlives the request.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::principal::{Principal, Role, UNAUTHENTICATED_MESSAGE};
use platform::token::TokenService;

use crate::error::AuthResult;
use crate::presentation::policy::{Access, AccessPolicy};

/// Message for authenticated callers lacking the required role
pub const ACCESS_DENIED_MESSAGE: &str = "Access is denied";

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware state
#[derive(Clone)]
pub struct AuthPipelineState {
    pub tokens: Arc<TokenService>,
    pub policy: Arc<AccessPolicy>,
}

impl AuthPipelineState {
    pub fn new(tokens: Arc<TokenService>, policy: AccessPolicy) -> Self {
        Self {
            tokens,
            policy: Arc::new(policy),
        }
    }
}

/// Token after the case-sensitive `Bearer ` prefix
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// Validate a token and build the principal
///
/// Tokens without a role claim belong to the admin.
pub fn authenticate(tokens: &TokenService, token: &str) -> AuthResult<Principal> {
    let claims = tokens.parse(token)?;
    let role = match claims.role() {
        None => Role::Admin,
        Some(code) => Role::from_code(code)?,
    };
    Ok(Principal::new(claims.sub, role))
}

/// The pipeline itself; mount with `axum::middleware::from_fn_with_state`
pub async fn auth_pipeline(
    State(state): State<AuthPipelineState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let principal = match bearer_token(req.headers()) {
        Some(token) => match authenticate(&state.tokens, token) {
            Ok(principal) => Some(principal),
            Err(e) => {
                tracing::debug!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    reason = %e,
                    "Bearer token rejected"
                );
                None
            }
        },
        None => None,
    };

    match state.policy.classify(req.method(), req.uri().path()) {
        Access::Public => {}
        Access::Authenticated | Access::Admin if principal.is_none() => {
            tracing::debug!(
                method = %req.method(),
                path = %req.uri().path(),
                "Unauthenticated request to protected route"
            );
            return AppError::unauthorized(UNAUTHENTICATED_MESSAGE).into_response();
        }
        Access::Admin if !principal.as_ref().is_some_and(Principal::is_admin) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                subject = principal.as_ref().map(Principal::subject).unwrap_or_default(),
                "Access denied: admin role required"
            );
            return AppError::forbidden(ACCESS_DENIED_MESSAGE).into_response();
        }
        Access::Authenticated | Access::Admin => {}
    }

    if let Some(principal) = principal {
        req.extensions_mut().insert(principal);
    }

    next.run(req).await
}
