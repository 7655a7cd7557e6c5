//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every query is scoped to non-deleted rows; absent rows are `None`, never
//! an error.

use kernel::audit::Actor;
use kernel::id::{ProfileId, ProjectId, SkillId};

use crate::domain::entities::{
    NewProfile, NewProject, NewSkill, Profile, Project, Skill,
};
use crate::domain::value_objects::{ProjectStatus, SkillCategory};
use crate::error::PortfolioResult;

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Lowest-id non-deleted profile
    async fn find_owner(&self) -> PortfolioResult<Option<Profile>>;

    async fn find_profile_by_id(&self, id: ProfileId) -> PortfolioResult<Option<Profile>>;

    /// Non-deleted profiles, id ascending
    async fn find_all_profiles(&self) -> PortfolioResult<Vec<Profile>>;

    /// Number of non-deleted profiles (startup singleton check)
    async fn count_active_profiles(&self) -> PortfolioResult<i64>;

    async fn insert_profile(&self, profile: NewProfile, actor: &Actor)
    -> PortfolioResult<Profile>;

    /// Persist every mutable field of `profile`; returns the stored row
    async fn update_profile(&self, profile: &Profile, actor: &Actor) -> PortfolioResult<Profile>;

    /// Soft delete; `false` when no non-deleted row matched
    async fn soft_delete_profile(&self, id: ProfileId, actor: &Actor) -> PortfolioResult<bool>;
}

/// Project repository trait
///
/// List queries sort by `display_order` ascending, ties by id.
#[trait_variant::make(ProjectRepository: Send)]
pub trait LocalProjectRepository {
    async fn find_all_projects(&self) -> PortfolioResult<Vec<Project>>;

    async fn find_featured_projects(&self) -> PortfolioResult<Vec<Project>>;

    async fn find_projects_by_category(&self, category: &str) -> PortfolioResult<Vec<Project>>;

    async fn find_projects_by_status(&self, status: ProjectStatus)
    -> PortfolioResult<Vec<Project>>;

    async fn find_project_by_id(&self, id: ProjectId) -> PortfolioResult<Option<Project>>;

    async fn exists_project_by_title(&self, title: &str) -> PortfolioResult<bool>;

    async fn exists_project_by_title_other_than(
        &self,
        title: &str,
        id: ProjectId,
    ) -> PortfolioResult<bool>;

    /// Insert; the title uniqueness check runs in the same transaction
    async fn insert_project(&self, project: NewProject, actor: &Actor)
    -> PortfolioResult<Project>;

    /// Update; the title uniqueness check runs in the same transaction
    async fn update_project(&self, project: &Project, actor: &Actor) -> PortfolioResult<Project>;

    async fn soft_delete_project(&self, id: ProjectId, actor: &Actor) -> PortfolioResult<bool>;
}

/// Skill repository trait
///
/// List queries sort by `priority` ascending, ties by id.
#[trait_variant::make(SkillRepository: Send)]
pub trait LocalSkillRepository {
    async fn find_all_skills(&self) -> PortfolioResult<Vec<Skill>>;

    async fn find_skills_by_category(&self, category: SkillCategory)
    -> PortfolioResult<Vec<Skill>>;

    async fn find_skill_by_id(&self, id: SkillId) -> PortfolioResult<Option<Skill>>;

    async fn exists_skill_by_name(&self, name: &str) -> PortfolioResult<bool>;

    async fn exists_skill_by_name_other_than(
        &self,
        name: &str,
        id: SkillId,
    ) -> PortfolioResult<bool>;

    async fn insert_skill(&self, skill: NewSkill, actor: &Actor) -> PortfolioResult<Skill>;

    async fn update_skill(&self, skill: &Skill, actor: &Actor) -> PortfolioResult<Skill>;

    async fn soft_delete_skill(&self, id: SkillId, actor: &Actor) -> PortfolioResult<bool>;
}

/// Everything the portfolio services need from storage
pub trait PortfolioRepository:
    ProfileRepository + ProjectRepository + SkillRepository + Clone + Send + Sync + 'static
{
}

impl<T> PortfolioRepository for T where
    T: ProfileRepository + ProjectRepository + SkillRepository + Clone + Send + Sync + 'static
{
}
