//! HTTP Handlers
//!
//! Public read handlers and the admin write handlers. The auth pipeline in
//! front of the router has already checked the caller; admin handlers only
//! take the [`Principal`] to record who made the change.

use std::sync::Arc;

use axum::extract::State;
use kernel::audit::Actor;
use kernel::http::{Json, Path};
use kernel::id::{ProfileId, ProjectId, SkillId};
use kernel::principal::Principal;
use kernel::response::ApiResponse;
use platform::cache::CacheStats;

use crate::application::{PortfolioCaches, ProfileService, ProjectService, SkillService};
use crate::domain::entities::Project;
use crate::domain::repository::PortfolioRepository;
use crate::domain::value_objects::SkillCategory;
use crate::error::{PortfolioError, PortfolioResult};
use crate::presentation::dto::{
    CreateProjectRequest, CreateSkillRequest, HealthResponse, ProfileResponse, ProjectResponse,
    SkillResponse, UpdateProfileRequest, UpdateProjectRequest, UpdateSkillRequest,
};

pub const HEALTH_MESSAGE: &str = "Service is running normally";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";
pub const PROFILE_DELETED_MESSAGE: &str = "Profile deleted successfully";
pub const PROFILE_CACHE_CLEARED_MESSAGE: &str = "Profile cache cleared";
pub const PROJECT_UPDATED_MESSAGE: &str = "Project updated successfully";
pub const PROJECT_DELETED_MESSAGE: &str = "Project deleted successfully";
pub const PROJECTS_CACHE_CLEARED_MESSAGE: &str = "Projects cache cleared";
pub const SKILL_UPDATED_MESSAGE: &str = "Skill updated successfully";
pub const SKILL_DELETED_MESSAGE: &str = "Skill deleted successfully";
pub const SKILLS_CACHE_CLEARED_MESSAGE: &str = "Skills cache cleared";

/// Shared state for portfolio handlers
#[derive(Clone)]
pub struct PortfolioAppState<R>
where
    R: PortfolioRepository,
{
    pub profiles: ProfileService<R>,
    pub projects: ProjectService<R>,
    pub skills: SkillService<R>,
    pub caches: Arc<PortfolioCaches>,
}

impl<R> PortfolioAppState<R>
where
    R: PortfolioRepository,
{
    pub fn new(repo: Arc<R>, caches: Arc<PortfolioCaches>) -> Self {
        Self {
            profiles: ProfileService::new(repo.clone(), caches.clone()),
            projects: ProjectService::new(repo.clone(), caches.clone()),
            skills: SkillService::new(repo, caches.clone()),
            caches,
        }
    }
}

fn project_list(projects: &[Project]) -> Vec<ProjectResponse> {
    projects.iter().cloned().map(ProjectResponse::from).collect()
}

/// Path categories bind like an enum: trimmed, then matched case-sensitively
fn parse_category(value: String) -> PortfolioResult<SkillCategory> {
    SkillCategory::from_exact(value.trim()).ok_or(PortfolioError::InvalidParameter {
        parameter: "category",
        value,
    })
}

// ============================================================================
// Health
// ============================================================================

/// GET /api/v1/health
pub async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::success_with_message(HEALTH_MESSAGE, HealthResponse::up())
}

// ============================================================================
// Public reads
// ============================================================================

/// GET /api/v1/profile
pub async fn get_owner_profile<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<ApiResponse<ProfileResponse>> {
    let profile = state.profiles.get_owner_profile().await?;
    Ok(ApiResponse::success(profile.into()))
}

/// GET /api/v1/projects
pub async fn get_all_projects<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<ApiResponse<Vec<ProjectResponse>>> {
    let projects = state.projects.get_all_projects().await?;
    Ok(ApiResponse::success(project_list(&projects)))
}

/// GET /api/v1/projects/featured
pub async fn get_featured_projects<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<ApiResponse<Vec<ProjectResponse>>> {
    let projects = state.projects.get_featured_projects().await?;
    Ok(ApiResponse::success(project_list(&projects)))
}

/// GET /api/v1/projects/category/{category}
pub async fn get_projects_by_category<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    Path(category): Path<String>,
) -> PortfolioResult<ApiResponse<Vec<ProjectResponse>>> {
    let projects = state.projects.get_projects_by_category(&category).await?;
    Ok(ApiResponse::success(project_list(&projects)))
}

/// GET /api/v1/projects/status/{status}
pub async fn get_projects_by_status<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    Path(status): Path<String>,
) -> PortfolioResult<ApiResponse<Vec<ProjectResponse>>> {
    let projects = state.projects.get_projects_by_status(&status).await?;
    Ok(ApiResponse::success(project_list(&projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_project<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    Path(id): Path<i64>,
) -> PortfolioResult<ApiResponse<ProjectResponse>> {
    let project = state.projects.get_project_by_id(ProjectId::new(id)).await?;
    Ok(ApiResponse::success(project.into()))
}

/// GET /api/v1/skills
pub async fn get_all_skills<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<ApiResponse<Vec<SkillResponse>>> {
    let skills = state.skills.get_all_skills().await?;
    Ok(ApiResponse::success(
        skills.into_iter().map(SkillResponse::from).collect(),
    ))
}

/// GET /api/v1/skills/{id}
pub async fn get_skill<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    Path(id): Path<i64>,
) -> PortfolioResult<ApiResponse<SkillResponse>> {
    let skill = state.skills.get_skill_by_id(SkillId::new(id)).await?;
    Ok(ApiResponse::success(skill.into()))
}

/// GET /api/v1/skills/category/{category}
pub async fn get_skills_by_category<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    Path(category): Path<String>,
) -> PortfolioResult<ApiResponse<Vec<SkillResponse>>> {
    let category = parse_category(category)?;
    let skills = state.skills.get_skills_by_category(category).await?;
    Ok(ApiResponse::success(
        skills.into_iter().map(SkillResponse::from).collect(),
    ))
}

// ============================================================================
// Admin: profile
// ============================================================================

/// GET /api/v1/admin/profile
pub async fn admin_get_owner_profile<R: PortfolioRepository>(
    state: State<PortfolioAppState<R>>,
) -> PortfolioResult<ApiResponse<ProfileResponse>> {
    get_owner_profile(state).await
}

/// PUT /api/v1/admin/profile
pub async fn update_owner_profile<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Json(req): Json<UpdateProfileRequest>,
) -> PortfolioResult<ApiResponse<ProfileResponse>> {
    req.validate()?;

    let profile = state
        .profiles
        .update_owner_profile(req.into_patch(), &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::success_with_message(
        PROFILE_UPDATED_MESSAGE,
        profile.into(),
    ))
}

/// DELETE /api/v1/admin/profile/cache
pub async fn clear_profile_cache<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> ApiResponse<()> {
    state.profiles.refresh_profile_cache();
    ApiResponse::<()>::message(PROFILE_CACHE_CLEARED_MESSAGE)
}

/// GET /api/v1/admin/profiles
pub async fn get_all_profiles<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<ApiResponse<Vec<ProfileResponse>>> {
    let profiles = state.profiles.get_all_profiles().await?;
    Ok(ApiResponse::success(
        profiles.into_iter().map(ProfileResponse::from).collect(),
    ))
}

/// GET /api/v1/admin/profile/{id}
pub async fn get_profile<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    Path(id): Path<i64>,
) -> PortfolioResult<ApiResponse<ProfileResponse>> {
    let profile = state.profiles.get_profile_by_id(ProfileId::new(id)).await?;
    Ok(ApiResponse::success(profile.into()))
}

/// PUT /api/v1/admin/profile/{id}
pub async fn update_profile<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProfileRequest>,
) -> PortfolioResult<ApiResponse<ProfileResponse>> {
    req.validate()?;

    let profile = state
        .profiles
        .update_profile(ProfileId::new(id), req.into_patch(), &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::success_with_message(
        PROFILE_UPDATED_MESSAGE,
        profile.into(),
    ))
}

/// DELETE /api/v1/admin/profile/{id}
pub async fn delete_profile<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
) -> PortfolioResult<ApiResponse<()>> {
    state
        .profiles
        .delete_profile(ProfileId::new(id), &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::<()>::message(PROFILE_DELETED_MESSAGE))
}

// ============================================================================
// Admin: projects
// ============================================================================

/// POST /api/v1/admin/projects
pub async fn create_project<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Json(req): Json<CreateProjectRequest>,
) -> PortfolioResult<ApiResponse<ProjectResponse>> {
    let project = req.into_new_project()?;

    let created = state
        .projects
        .create_project(project, &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::created(created.into()))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update_project<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> PortfolioResult<ApiResponse<ProjectResponse>> {
    let patch = req.into_patch()?;

    let updated = state
        .projects
        .update_project(ProjectId::new(id), patch, &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::success_with_message(
        PROJECT_UPDATED_MESSAGE,
        updated.into(),
    ))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete_project<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
) -> PortfolioResult<ApiResponse<()>> {
    state
        .projects
        .delete_project(ProjectId::new(id), &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::<()>::message(PROJECT_DELETED_MESSAGE))
}

/// DELETE /api/v1/admin/projects/cache
pub async fn clear_projects_cache<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> ApiResponse<()> {
    state.projects.refresh_projects_cache();
    ApiResponse::<()>::message(PROJECTS_CACHE_CLEARED_MESSAGE)
}

// ============================================================================
// Admin: skills
// ============================================================================

/// POST /api/v1/admin/skills
pub async fn create_skill<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Json(req): Json<CreateSkillRequest>,
) -> PortfolioResult<ApiResponse<SkillResponse>> {
    let skill = req.into_new_skill()?;

    let created = state
        .skills
        .create_skill(skill, &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::created(created.into()))
}

/// PUT /api/v1/admin/skills/{id}
pub async fn update_skill<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSkillRequest>,
) -> PortfolioResult<ApiResponse<SkillResponse>> {
    let patch = req.into_patch()?;

    let updated = state
        .skills
        .update_skill(SkillId::new(id), patch, &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::success_with_message(
        SKILL_UPDATED_MESSAGE,
        updated.into(),
    ))
}

/// DELETE /api/v1/admin/skills/{id}
pub async fn delete_skill<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
) -> PortfolioResult<ApiResponse<()>> {
    state
        .skills
        .delete_skill(SkillId::new(id), &Actor::from(&principal))
        .await?;

    Ok(ApiResponse::<()>::message(SKILL_DELETED_MESSAGE))
}

/// DELETE /api/v1/admin/skills/cache
pub async fn clear_skills_cache<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> ApiResponse<()> {
    state.skills.refresh_skills_cache();
    ApiResponse::<()>::message(SKILLS_CACHE_CLEARED_MESSAGE)
}

// ============================================================================
// Admin: cache statistics
// ============================================================================

/// GET /api/v1/admin/cache/stats
pub async fn cache_stats<R: PortfolioRepository>(
    State(state): State<PortfolioAppState<R>>,
) -> ApiResponse<Vec<CacheStats>> {
    ApiResponse::success(state.caches.stats().await)
}
