//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL repository; used by tests and local runs
//! without a database. Every read bumps a per-operation counter so tests can
//! observe how often the store was actually queried.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use kernel::audit::{Actor, Audit};
use kernel::id::{ProfileId, ProjectId, SkillId};
use tokio::sync::RwLock;

use crate::domain::entities::{
    NewProfile, NewProject, NewSkill, Profile, Project, Skill,
};
use crate::domain::repository::{ProfileRepository, ProjectRepository, SkillRepository};
use crate::domain::value_objects::{ProjectStatus, SkillCategory};
use crate::error::{PortfolioError, PortfolioResult};

#[derive(Default)]
struct State {
    profiles: Vec<Profile>,
    projects: Vec<Project>,
    skills: Vec<Skill>,
    next_profile_id: i64,
    next_project_id: i64,
    next_skill_id: i64,
}

impl State {
    fn live_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| !p.audit.is_deleted)
    }

    fn live_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(|s| !s.audit.is_deleted)
    }

    fn title_taken(&self, title: &str, except: Option<ProjectId>) -> bool {
        self.live_projects()
            .any(|p| p.title == title && Some(p.id) != except)
    }

    fn name_taken(&self, name: &str, except: Option<SkillId>) -> bool {
        self.live_skills()
            .any(|s| s.name == name && Some(s.id) != except)
    }
}

fn by_display_order(mut projects: Vec<Project>) -> Vec<Project> {
    projects.sort_by_key(|p| (p.display_order, p.id));
    projects
}

fn by_priority(mut skills: Vec<Skill>) -> Vec<Skill> {
    skills.sort_by_key(|s| (s.priority, s.id));
    skills
}

/// `tokio::sync::RwLock`-backed portfolio repository
#[derive(Clone, Default)]
pub struct InMemoryPortfolioRepository {
    state: Arc<RwLock<State>>,
    queries: Arc<Mutex<HashMap<&'static str, u64>>>,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a read operation reached the store
    pub fn query_count(&self, operation: &str) -> u64 {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    fn record(&self, operation: &'static str) {
        *self
            .queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(operation)
            .or_insert(0) += 1;
    }
}

// ============================================================================
// Profile
// ============================================================================

impl ProfileRepository for InMemoryPortfolioRepository {
    async fn find_owner(&self) -> PortfolioResult<Option<Profile>> {
        self.record("find_owner");
        let state = self.state.read().await;
        Ok(state
            .profiles
            .iter()
            .filter(|p| !p.audit.is_deleted)
            .min_by_key(|p| p.id)
            .cloned())
    }

    async fn find_profile_by_id(&self, id: ProfileId) -> PortfolioResult<Option<Profile>> {
        self.record("find_profile_by_id");
        let state = self.state.read().await;
        Ok(state
            .profiles
            .iter()
            .find(|p| p.id == id && !p.audit.is_deleted)
            .cloned())
    }

    async fn find_all_profiles(&self) -> PortfolioResult<Vec<Profile>> {
        self.record("find_all_profiles");
        let state = self.state.read().await;
        let mut profiles: Vec<Profile> = state
            .profiles
            .iter()
            .filter(|p| !p.audit.is_deleted)
            .cloned()
            .collect();
        profiles.sort_by_key(|p| p.id);
        Ok(profiles)
    }

    async fn count_active_profiles(&self) -> PortfolioResult<i64> {
        let state = self.state.read().await;
        Ok(state.profiles.iter().filter(|p| !p.audit.is_deleted).count() as i64)
    }

    async fn insert_profile(
        &self,
        profile: NewProfile,
        actor: &Actor,
    ) -> PortfolioResult<Profile> {
        let mut state = self.state.write().await;
        state.next_profile_id += 1;

        let created = Profile {
            id: ProfileId::new(state.next_profile_id),
            full_name: profile.full_name,
            title: None,
            bio: None,
            professional_summary: None,
            experience_years: None,
            total_projects: None,
            education_summary: None,
            cert_summary: None,
            email: None,
            phone_number: None,
            github_url: None,
            linkedin_url: None,
            avatar_url: None,
            audit: Audit::new(actor, Utc::now()),
        };
        state.profiles.push(created.clone());

        Ok(created)
    }

    async fn update_profile(&self, profile: &Profile, actor: &Actor) -> PortfolioResult<Profile> {
        let mut state = self.state.write().await;
        let stored = state
            .profiles
            .iter_mut()
            .find(|p| p.id == profile.id && !p.audit.is_deleted)
            .ok_or_else(|| PortfolioError::profile_not_found(profile.id))?;

        let audit = stored.audit.clone();
        *stored = Profile {
            audit,
            ..profile.clone()
        };
        stored.audit.touch(actor, Utc::now());

        Ok(stored.clone())
    }

    async fn soft_delete_profile(&self, id: ProfileId, actor: &Actor) -> PortfolioResult<bool> {
        let mut state = self.state.write().await;
        match state
            .profiles
            .iter_mut()
            .find(|p| p.id == id && !p.audit.is_deleted)
        {
            Some(profile) => {
                profile.audit.mark_deleted(actor, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Project
// ============================================================================

impl ProjectRepository for InMemoryPortfolioRepository {
    async fn find_all_projects(&self) -> PortfolioResult<Vec<Project>> {
        self.record("find_all_projects");
        let state = self.state.read().await;
        Ok(by_display_order(state.live_projects().cloned().collect()))
    }

    async fn find_featured_projects(&self) -> PortfolioResult<Vec<Project>> {
        self.record("find_featured_projects");
        let state = self.state.read().await;
        Ok(by_display_order(
            state.live_projects().filter(|p| p.is_featured).cloned().collect(),
        ))
    }

    async fn find_projects_by_category(&self, category: &str) -> PortfolioResult<Vec<Project>> {
        self.record("find_projects_by_category");
        let state = self.state.read().await;
        Ok(by_display_order(
            state
                .live_projects()
                .filter(|p| p.category.as_deref() == Some(category))
                .cloned()
                .collect(),
        ))
    }

    async fn find_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> PortfolioResult<Vec<Project>> {
        self.record("find_projects_by_status");
        let state = self.state.read().await;
        Ok(by_display_order(
            state
                .live_projects()
                .filter(|p| p.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn find_project_by_id(&self, id: ProjectId) -> PortfolioResult<Option<Project>> {
        self.record("find_project_by_id");
        let state = self.state.read().await;
        Ok(state.live_projects().find(|p| p.id == id).cloned())
    }

    async fn exists_project_by_title(&self, title: &str) -> PortfolioResult<bool> {
        Ok(self.state.read().await.title_taken(title, None))
    }

    async fn exists_project_by_title_other_than(
        &self,
        title: &str,
        id: ProjectId,
    ) -> PortfolioResult<bool> {
        Ok(self.state.read().await.title_taken(title, Some(id)))
    }

    async fn insert_project(
        &self,
        project: NewProject,
        actor: &Actor,
    ) -> PortfolioResult<Project> {
        let mut state = self.state.write().await;

        if state.title_taken(&project.title, None) {
            return Err(PortfolioError::duplicate_project_title(project.title));
        }

        state.next_project_id += 1;
        let created = Project {
            id: ProjectId::new(state.next_project_id),
            title: project.title,
            short_description: project.short_description,
            full_description: project.full_description,
            image_url: project.image_url,
            demo_url: project.demo_url,
            github_url: project.github_url,
            review_url: project.review_url,
            video_url: project.video_url,
            gallery: project.gallery,
            technologies: project.technologies,
            category: project.category,
            is_featured: project.is_featured,
            display_order: project.display_order,
            status: project.status,
            project_date: project.project_date,
            audit: Audit::new(actor, Utc::now()),
        };
        state.projects.push(created.clone());

        Ok(created)
    }

    async fn update_project(&self, project: &Project, actor: &Actor) -> PortfolioResult<Project> {
        let mut state = self.state.write().await;

        if state.title_taken(&project.title, Some(project.id)) {
            return Err(PortfolioError::duplicate_project_title(project.title.clone()));
        }

        let stored = state
            .projects
            .iter_mut()
            .find(|p| p.id == project.id && !p.audit.is_deleted)
            .ok_or_else(|| PortfolioError::project_not_found(project.id))?;

        let audit = stored.audit.clone();
        *stored = Project {
            audit,
            ..project.clone()
        };
        stored.audit.touch(actor, Utc::now());

        Ok(stored.clone())
    }

    async fn soft_delete_project(&self, id: ProjectId, actor: &Actor) -> PortfolioResult<bool> {
        let mut state = self.state.write().await;
        match state
            .projects
            .iter_mut()
            .find(|p| p.id == id && !p.audit.is_deleted)
        {
            Some(project) => {
                project.audit.mark_deleted(actor, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Skill
// ============================================================================

impl SkillRepository for InMemoryPortfolioRepository {
    async fn find_all_skills(&self) -> PortfolioResult<Vec<Skill>> {
        self.record("find_all_skills");
        let state = self.state.read().await;
        Ok(by_priority(state.live_skills().cloned().collect()))
    }

    async fn find_skills_by_category(
        &self,
        category: SkillCategory,
    ) -> PortfolioResult<Vec<Skill>> {
        self.record("find_skills_by_category");
        let state = self.state.read().await;
        Ok(by_priority(
            state
                .live_skills()
                .filter(|s| s.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn find_skill_by_id(&self, id: SkillId) -> PortfolioResult<Option<Skill>> {
        self.record("find_skill_by_id");
        let state = self.state.read().await;
        Ok(state.live_skills().find(|s| s.id == id).cloned())
    }

    async fn exists_skill_by_name(&self, name: &str) -> PortfolioResult<bool> {
        Ok(self.state.read().await.name_taken(name, None))
    }

    async fn exists_skill_by_name_other_than(
        &self,
        name: &str,
        id: SkillId,
    ) -> PortfolioResult<bool> {
        Ok(self.state.read().await.name_taken(name, Some(id)))
    }

    async fn insert_skill(&self, skill: NewSkill, actor: &Actor) -> PortfolioResult<Skill> {
        let mut state = self.state.write().await;

        if state.name_taken(&skill.name, None) {
            return Err(PortfolioError::duplicate_skill_name(skill.name));
        }

        state.next_skill_id += 1;
        let created = Skill {
            id: SkillId::new(state.next_skill_id),
            name: skill.name,
            category: skill.category,
            level: skill.level,
            priority: skill.priority,
            audit: Audit::new(actor, Utc::now()),
        };
        state.skills.push(created.clone());

        Ok(created)
    }

    async fn update_skill(&self, skill: &Skill, actor: &Actor) -> PortfolioResult<Skill> {
        let mut state = self.state.write().await;

        if state.name_taken(&skill.name, Some(skill.id)) {
            return Err(PortfolioError::duplicate_skill_name(skill.name.clone()));
        }

        let stored = state
            .skills
            .iter_mut()
            .find(|s| s.id == skill.id && !s.audit.is_deleted)
            .ok_or_else(|| PortfolioError::skill_not_found(skill.id))?;

        let audit = stored.audit.clone();
        *stored = Skill {
            audit,
            ..skill.clone()
        };
        stored.audit.touch(actor, Utc::now());

        Ok(stored.clone())
    }

    async fn soft_delete_skill(&self, id: SkillId, actor: &Actor) -> PortfolioResult<bool> {
        let mut state = self.state.write().await;
        match state
            .skills
            .iter_mut()
            .find(|s| s.id == id && !s.audit.is_deleted)
        {
            Some(skill) => {
                skill.audit.mark_deleted(actor, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
