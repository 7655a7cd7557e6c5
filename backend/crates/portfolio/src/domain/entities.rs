//! Domain Entities
//!
//! Core business entities for the portfolio domain. Every entity carries the
//! shared [`Audit`] columns; soft-deleted rows never leave the repository.

use chrono::NaiveDate;
use kernel::audit::Audit;
use kernel::id::{ProfileId, ProjectId, SkillId};
use serde_json::{Map, Value};

use crate::domain::value_objects::{ProjectStatus, SkillCategory, SkillLevel};

/// Opaque structured long description of a project
pub type StructuredDescription = Map<String, Value>;

fn assign<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Owner profile (singleton among non-deleted rows)
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
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
    pub audit: Audit,
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
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

impl Profile {
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        assign(&mut self.title, patch.title);
        assign(&mut self.bio, patch.bio);
        assign(&mut self.professional_summary, patch.professional_summary);
        assign(&mut self.experience_years, patch.experience_years);
        assign(&mut self.total_projects, patch.total_projects);
        assign(&mut self.education_summary, patch.education_summary);
        assign(&mut self.cert_summary, patch.cert_summary);
        assign(&mut self.email, patch.email);
        assign(&mut self.phone_number, patch.phone_number);
        assign(&mut self.github_url, patch.github_url);
        assign(&mut self.linkedin_url, patch.linkedin_url);
        assign(&mut self.avatar_url, patch.avatar_url);
    }
}

/// Minimal owner profile created at bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub full_name: String,
}

// ============================================================================
// Project
// ============================================================================

/// Portfolio project
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    /// Unique among non-deleted projects
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
    /// Smaller sorts first; ties broken by id
    pub display_order: i32,
    pub status: ProjectStatus,
    pub project_date: Option<NaiveDate>,
    pub audit: Audit,
}

/// Fields of a project about to be inserted, defaults already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
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
}

impl NewProject {
    /// Project with only a title; every other field at its default
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            short_description: None,
            full_description: None,
            image_url: None,
            demo_url: None,
            github_url: None,
            review_url: None,
            video_url: None,
            gallery: Vec::new(),
            technologies: None,
            category: None,
            is_featured: false,
            display_order: 0,
            status: ProjectStatus::default(),
            project_date: None,
        }
    }
}

/// Partial project update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
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
    pub status: Option<ProjectStatus>,
    pub project_date: Option<NaiveDate>,
}

impl Project {
    /// New title when the patch renames the project
    pub fn renamed_to<'a>(&self, patch: &'a ProjectPatch) -> Option<&'a str> {
        patch
            .title
            .as_deref()
            .filter(|title| *title != self.title)
    }

    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        assign(&mut self.short_description, patch.short_description);
        assign(&mut self.full_description, patch.full_description);
        assign(&mut self.image_url, patch.image_url);
        assign(&mut self.demo_url, patch.demo_url);
        assign(&mut self.github_url, patch.github_url);
        assign(&mut self.review_url, patch.review_url);
        assign(&mut self.video_url, patch.video_url);
        if let Some(gallery) = patch.gallery {
            self.gallery = gallery;
        }
        assign(&mut self.technologies, patch.technologies);
        assign(&mut self.category, patch.category);
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(display_order) = patch.display_order {
            self.display_order = display_order;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        assign(&mut self.project_date, patch.project_date);
    }
}

// ============================================================================
// Skill
// ============================================================================

/// Technical skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: SkillId,
    /// Unique among non-deleted skills
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    /// Non-negative; smaller sorts first
    pub priority: i32,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSkill {
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub priority: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub level: Option<SkillLevel>,
    pub priority: Option<i32>,
}

impl Skill {
    pub fn renamed_to<'a>(&self, patch: &'a SkillPatch) -> Option<&'a str> {
        patch.name.as_deref().filter(|name| *name != self.name)
    }

    pub fn apply(&mut self, patch: SkillPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kernel::audit::Actor;

    fn project() -> Project {
        let new = NewProject::titled("Portfolio");
        Project {
            id: ProjectId::new(1),
            title: new.title,
            short_description: Some("Short".into()),
            full_description: None,
            image_url: None,
            demo_url: None,
            github_url: None,
            review_url: None,
            video_url: None,
            gallery: new.gallery,
            technologies: Some(vec!["Rust".into()]),
            category: Some("Backend".into()),
            is_featured: new.is_featured,
            display_order: new.display_order,
            status: new.status,
            project_date: None,
            audit: Audit::new(&Actor::system(), Utc::now()),
        }
    }

    #[test]
    fn test_new_project_defaults() {
        let new = NewProject::titled("P1");
        assert!(!new.is_featured);
        assert_eq!(new.display_order, 0);
        assert_eq!(new.status, ProjectStatus::Completed);
        assert!(new.gallery.is_empty());
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let original = project();
        let mut patched = original.clone();
        patched.apply(ProjectPatch::default());
        assert_eq!(patched, original);
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut p = project();
        p.apply(ProjectPatch {
            is_featured: Some(true),
            status: Some(ProjectStatus::Archived),
            ..Default::default()
        });
        assert!(p.is_featured);
        assert_eq!(p.status, ProjectStatus::Archived);
        assert_eq!(p.short_description.as_deref(), Some("Short"));
        assert_eq!(p.technologies, Some(vec!["Rust".to_string()]));
    }

    #[test]
    fn test_renamed_to() {
        let p = project();
        let same = ProjectPatch {
            title: Some("Portfolio".into()),
            ..Default::default()
        };
        let renamed = ProjectPatch {
            title: Some("Other".into()),
            ..Default::default()
        };
        assert_eq!(p.renamed_to(&same), None);
        assert_eq!(p.renamed_to(&renamed), Some("Other"));
        assert_eq!(p.renamed_to(&ProjectPatch::default()), None);
    }

    #[test]
    fn test_skill_patch() {
        let mut skill = Skill {
            id: SkillId::new(3),
            name: "Rust".into(),
            category: SkillCategory::Backend,
            level: SkillLevel::Medium,
            priority: 2,
            audit: Audit::new(&Actor::system(), Utc::now()),
        };
        skill.apply(SkillPatch {
            level: Some(SkillLevel::High),
            ..Default::default()
        });
        assert_eq!(skill.level, SkillLevel::High);
        assert_eq!(skill.name, "Rust");
        assert_eq!(skill.priority, 2);
    }

    #[test]
    fn test_profile_patch_keeps_absent_fields() {
        let mut profile = Profile {
            id: ProfileId::new(1),
            full_name: "Owner".into(),
            title: Some("Engineer".into()),
            bio: Some("Bio".into()),
            professional_summary: None,
            experience_years: Some("5+".into()),
            total_projects: None,
            education_summary: None,
            cert_summary: None,
            email: None,
            phone_number: None,
            github_url: None,
            linkedin_url: None,
            avatar_url: None,
            audit: Audit::new(&Actor::system(), Utc::now()),
        };
        profile.apply(ProfilePatch {
            title: Some("New".into()),
            ..Default::default()
        });
        assert_eq!(profile.title.as_deref(), Some("New"));
        assert_eq!(profile.bio.as_deref(), Some("Bio"));
        assert_eq!(profile.full_name, "Owner");
    }
}
