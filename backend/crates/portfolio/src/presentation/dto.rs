//! API DTOs (Data Transfer Objects)
//!
//! Wire shapes use snake_case keys. Request bodies are validated field by
//! field before any service call; every failing field is reported at once.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ProfileId, ProjectId, SkillId};
use kernel::validation::{FieldErrors, Validator};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    NewProject, NewSkill, Profile, ProfilePatch, Project, ProjectPatch, Skill, SkillPatch,
    StructuredDescription,
};
use crate::domain::value_objects::{ProjectStatus, SkillCategory, SkillLevel};

const NAME_MAX: usize = 255;
const URL_MAX: usize = 255;
const LONG_URL_MAX: usize = 500;

fn missing(field: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add(field, format!("{} is required", field));
    errors
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub full_name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub professional_summary: Option<String>,
    pub experience_years: Option<String>,
    pub total_projects: Option<String>,
    pub education_summary: Option<String>,
    pub cert_summary: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            title: p.title,
            bio: p.bio,
            professional_summary: p.professional_summary,
            experience_years: p.experience_years,
            total_projects: p.total_projects,
            education_summary: p.education_summary,
            cert_summary: p.cert_summary,
            email: p.email,
            phone_number: p.phone_number,
            github_url: p.github_url,
            linkedin_url: p.linkedin_url,
            avatar_url: p.avatar_url,
            created_at: p.audit.created_at,
            updated_at: p.audit.updated_at,
        }
    }
}

/// Profile patch; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub professional_summary: Option<String>,
    pub experience_years: Option<String>,
    pub total_projects: Option<String>,
    pub education_summary: Option<String>,
    pub cert_summary: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.not_blank("full_name", self.full_name.as_deref())
            .max_chars("full_name", self.full_name.as_deref(), NAME_MAX)
            .max_chars("title", self.title.as_deref(), NAME_MAX)
            .max_chars("bio", self.bio.as_deref(), 5000)
            .max_chars("professional_summary", self.professional_summary.as_deref(), 500)
            .max_chars("experience_years", self.experience_years.as_deref(), 50)
            .max_chars("total_projects", self.total_projects.as_deref(), 50)
            .max_chars("education_summary", self.education_summary.as_deref(), NAME_MAX)
            .max_chars("cert_summary", self.cert_summary.as_deref(), NAME_MAX)
            .email("email", self.email.as_deref())
            .max_chars("email", self.email.as_deref(), 100)
            .max_chars("phone_number", self.phone_number.as_deref(), 20)
            .max_chars("github_url", self.github_url.as_deref(), URL_MAX)
            .max_chars("linkedin_url", self.linkedin_url.as_deref(), URL_MAX)
            .max_chars("avatar_url", self.avatar_url.as_deref(), URL_MAX);
        v.finish()
    }

    pub fn into_patch(self) -> ProfilePatch {
        ProfilePatch {
            full_name: self.full_name,
            title: self.title,
            bio: self.bio,
            professional_summary: self.professional_summary,
            experience_years: self.experience_years,
            total_projects: self.total_projects,
            education_summary: self.education_summary,
            cert_summary: self.cert_summary,
            email: self.email,
            phone_number: self.phone_number,
            github_url: self.github_url,
            linkedin_url: self.linkedin_url,
            avatar_url: self.avatar_url,
        }
    }
}

// ============================================================================
// Project
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub title: String,
    pub short_description: Option<String>,
    pub full_description: Option<StructuredDescription>,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub review_url: Option<String>,
    pub video_url: Option<String>,
    pub gallery: Vec<String>,
    pub technologies: Option<Vec<String>>,
    pub category: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub status: ProjectStatus,
    pub project_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            short_description: p.short_description,
            full_description: p.full_description,
            image_url: p.image_url,
            demo_url: p.demo_url,
            github_url: p.github_url,
            review_url: p.review_url,
            video_url: p.video_url,
            gallery: p.gallery,
            technologies: p.technologies,
            category: p.category,
            is_featured: p.is_featured,
            display_order: p.display_order,
            status: p.status,
            project_date: p.project_date,
            created_at: p.audit.created_at,
            updated_at: p.audit.updated_at,
        }
    }
}

/// Fields shared by the create and update bodies
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFields {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<StructuredDescription>,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub review_url: Option<String>,
    pub video_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
    pub status: Option<String>,
    pub project_date: Option<NaiveDate>,
}

impl ProjectFields {
    fn check(&self, v: &mut Validator) -> Option<ProjectStatus> {
        v.not_blank("title", self.title.as_deref())
            .max_chars("title", self.title.as_deref(), NAME_MAX)
            .max_chars("short_description", self.short_description.as_deref(), 500)
            .max_chars("image_url", self.image_url.as_deref(), URL_MAX)
            .max_chars("demo_url", self.demo_url.as_deref(), URL_MAX)
            .max_chars("github_url", self.github_url.as_deref(), URL_MAX)
            .max_chars("review_url", self.review_url.as_deref(), LONG_URL_MAX)
            .max_chars("video_url", self.video_url.as_deref(), LONG_URL_MAX)
            .max_chars("category", self.category.as_deref(), 100);
        v.one_of(
            "status",
            self.status.as_deref(),
            ProjectStatus::from_code,
            &ProjectStatus::CODES,
        )
    }
}

/// Create project request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CreateProjectRequest(pub ProjectFields);

impl CreateProjectRequest {
    pub fn into_new_project(self) -> Result<NewProject, FieldErrors> {
        let fields = self.0;
        let mut v = Validator::new();
        v.required("title", fields.title.as_deref());
        let status = fields.check(&mut v);
        v.finish()?;

        let title = fields.title.ok_or_else(|| missing("title"))?;
        let mut project = NewProject::titled(title);
        project.short_description = fields.short_description;
        project.full_description = fields.full_description;
        project.image_url = fields.image_url;
        project.demo_url = fields.demo_url;
        project.github_url = fields.github_url;
        project.review_url = fields.review_url;
        project.video_url = fields.video_url;
        project.gallery = fields.gallery.unwrap_or_default();
        project.technologies = fields.technologies;
        project.category = fields.category;
        project.is_featured = fields.is_featured.unwrap_or(false);
        project.display_order = fields.display_order.unwrap_or(0);
        project.status = status.unwrap_or_default();
        project.project_date = fields.project_date;
        Ok(project)
    }
}

/// Update project request; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UpdateProjectRequest(pub ProjectFields);

impl UpdateProjectRequest {
    pub fn into_patch(self) -> Result<ProjectPatch, FieldErrors> {
        let fields = self.0;
        let mut v = Validator::new();
        let status = fields.check(&mut v);
        v.finish()?;

        Ok(ProjectPatch {
            title: fields.title,
            short_description: fields.short_description,
            full_description: fields.full_description,
            image_url: fields.image_url,
            demo_url: fields.demo_url,
            github_url: fields.github_url,
            review_url: fields.review_url,
            video_url: fields.video_url,
            gallery: fields.gallery,
            technologies: fields.technologies,
            category: fields.category,
            is_featured: fields.is_featured,
            display_order: fields.display_order,
            status,
            project_date: fields.project_date,
        })
    }
}

// ============================================================================
// Skill
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SkillResponse {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Skill> for SkillResponse {
    fn from(s: Skill) -> Self {
        Self {
            id: s.id,
            name: s.name,
            category: s.category,
            level: s.level,
            priority: s.priority,
            created_at: s.audit.created_at,
            updated_at: s.audit.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillFields {
    pub name: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub priority: Option<i32>,
}

impl SkillFields {
    fn check(&self, v: &mut Validator) -> (Option<SkillCategory>, Option<SkillLevel>) {
        v.not_blank("name", self.name.as_deref())
            .max_chars("name", self.name.as_deref(), 100)
            .non_negative("priority", self.priority);
        let category = v.one_of(
            "category",
            self.category.as_deref(),
            SkillCategory::from_code,
            &SkillCategory::CODES,
        );
        let level = v.one_of(
            "level",
            self.level.as_deref(),
            SkillLevel::from_code,
            &SkillLevel::CODES,
        );
        (category, level)
    }
}

/// Create skill request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CreateSkillRequest(pub SkillFields);

impl CreateSkillRequest {
    pub fn into_new_skill(self) -> Result<NewSkill, FieldErrors> {
        let fields = self.0;
        let mut v = Validator::new();
        v.required("name", fields.name.as_deref())
            .required("category", fields.category.as_deref())
            .required("level", fields.level.as_deref());
        let (category, level) = fields.check(&mut v);
        v.finish()?;

        Ok(NewSkill {
            name: fields.name.ok_or_else(|| missing("name"))?,
            category: category.ok_or_else(|| missing("category"))?,
            level: level.ok_or_else(|| missing("level"))?,
            priority: fields.priority.unwrap_or(0),
        })
    }
}

/// Update skill request; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UpdateSkillRequest(pub SkillFields);

impl UpdateSkillRequest {
    pub fn into_patch(self) -> Result<SkillPatch, FieldErrors> {
        let fields = self.0;
        let mut v = Validator::new();
        let (category, level) = fields.check(&mut v);
        v.finish()?;

        Ok(SkillPatch {
            name: fields.name,
            category,
            level,
            priority: fields.priority,
        })
    }
}

// ============================================================================
// Health
// ============================================================================

pub const SERVICE_NAME: &str = "Portfolio API";

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "UP",
            timestamp: Utc::now(),
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
