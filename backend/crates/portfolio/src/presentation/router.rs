//! Portfolio Router
//!
//! Mounted under `/api/v1`. Public reads, the health probe and the
//! `/admin` surface share one router; access rules live in the auth pipeline.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::application::PortfolioCaches;
use crate::domain::repository::PortfolioRepository;
use crate::presentation::handlers::{self, PortfolioAppState};

/// Create a generic Portfolio router for any repository implementation
pub fn portfolio_router_generic<R>(repo: R, caches: Arc<PortfolioCaches>) -> Router
where
    R: PortfolioRepository,
{
    let state = PortfolioAppState::new(Arc::new(repo), caches);

    let admin = Router::new()
        .route(
            "/profile",
            get(handlers::admin_get_owner_profile::<R>).put(handlers::update_owner_profile::<R>),
        )
        .route("/profile/cache", delete(handlers::clear_profile_cache::<R>))
        .route(
            "/profile/{id}",
            get(handlers::get_profile::<R>)
                .put(handlers::update_profile::<R>)
                .delete(handlers::delete_profile::<R>),
        )
        .route("/profiles", get(handlers::get_all_profiles::<R>))
        .route("/projects", post(handlers::create_project::<R>))
        .route("/projects/cache", delete(handlers::clear_projects_cache::<R>))
        .route(
            "/projects/{id}",
            put(handlers::update_project::<R>).delete(handlers::delete_project::<R>),
        )
        .route("/skills", post(handlers::create_skill::<R>))
        .route("/skills/cache", delete(handlers::clear_skills_cache::<R>))
        .route(
            "/skills/{id}",
            put(handlers::update_skill::<R>).delete(handlers::delete_skill::<R>),
        )
        .route("/cache/stats", get(handlers::cache_stats::<R>));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/profile", get(handlers::get_owner_profile::<R>))
        .route("/projects", get(handlers::get_all_projects::<R>))
        .route("/projects/featured", get(handlers::get_featured_projects::<R>))
        .route(
            "/projects/category/{category}",
            get(handlers::get_projects_by_category::<R>),
        )
        .route(
            "/projects/status/{status}",
            get(handlers::get_projects_by_status::<R>),
        )
        .route("/projects/{id}", get(handlers::get_project::<R>))
        .route("/skills", get(handlers::get_all_skills::<R>))
        .route(
            "/skills/category/{category}",
            get(handlers::get_skills_by_category::<R>),
        )
        .route("/skills/{id}", get(handlers::get_skill::<R>))
        .nest("/admin", admin)
        .with_state(state)
}
