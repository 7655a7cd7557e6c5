//! Portfolio API application
//!
//! Wires the auth and portfolio routers under `/api/v1` and wraps them in the
//! cross-cutting layers. The binary in `main.rs` only loads configuration,
//! connects the database and serves what [`build_app`] returns.
//!
//! Layer order, outermost first:
//! CORS → request tracing → error-path stamping → auth pipeline → deadline → routes

pub mod bootstrap;
pub mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::domain::repository::CredentialRepository;
use auth::{AccessPolicy, AuthPipelineState, auth_pipeline, auth_router_generic};
use axum::{Router, middleware};
use kernel::http::middleware::{enforce_deadline, not_found_fallback, stamp_error_path};
use platform::password::PasswordHasher;
use platform::token::TokenService;
use portfolio::{PortfolioCaches, PortfolioRepository, portfolio_router_generic};
use tower_http::trace::TraceLayer;

pub use config::{AppConfig, BootstrapConfig, HttpSettings};

/// API base path; access rules are written relative to it
pub const API_BASE: &str = "/api";

/// Shared services and repositories handed to the routers
pub struct AppContext<C, P> {
    pub credentials: C,
    pub portfolio: P,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<PasswordHasher>,
    pub caches: Arc<PortfolioCaches>,
}

/// Build the fully layered application router
pub fn build_app<C, P>(context: AppContext<C, P>, http: &HttpSettings) -> anyhow::Result<Router>
where
    C: CredentialRepository + Clone + Send + Sync + 'static,
    P: PortfolioRepository,
{
    let AppContext {
        credentials,
        portfolio,
        tokens,
        hasher,
        caches,
    } = context;

    let cors = http.cors.to_layer().context("Invalid CORS configuration")?;
    let pipeline = AuthPipelineState::new(tokens.clone(), AccessPolicy::new(API_BASE));

    let v1 = Router::new()
        .nest("/auth", auth_router_generic(credentials, tokens, hasher))
        .merge(portfolio_router_generic(portfolio, caches));

    Ok(Router::new()
        .nest(&format!("{}/v1", API_BASE), v1)
        .fallback(not_found_fallback)
        .layer(middleware::from_fn_with_state(
            http.request_timeout,
            enforce_deadline,
        ))
        .layer(middleware::from_fn_with_state(pipeline, auth_pipeline))
        .layer(middleware::from_fn(stamp_error_path))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}
