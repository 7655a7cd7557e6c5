//! Read-path caches
//!
//! Three named caches share one [`CacheSettings`]: `profile`, `projects` and
//! `skills`. Keys are built here so services and tests agree on them.

use std::sync::Arc;

use platform::cache::{CacheSettings, CacheStats, NamedCache};

use crate::domain::entities::{Profile, Project, Skill};

pub const PROFILE_CACHE: &str = "profile";
pub const PROJECTS_CACHE: &str = "projects";
pub const SKILLS_CACHE: &str = "skills";

pub const OWNER_KEY: &str = "owner";
pub const ALL_PROJECTS_KEY: &str = "all";
pub const FEATURED_PROJECTS_KEY: &str = "featured";

pub fn id_key(id: impl std::fmt::Display) -> String {
    id.to_string()
}

pub fn category_key(category: &str) -> String {
    format!("category_{}", category)
}

pub fn status_key(status: &str) -> String {
    format!("status_{}", status)
}

/// Entry of the `projects` cache: one project by id, or a list query
#[derive(Debug, Clone)]
pub enum ProjectsEntry {
    Single(Project),
    List(Arc<Vec<Project>>),
}

/// The portfolio's named caches
pub struct PortfolioCaches {
    pub profile: NamedCache<Profile>,
    pub projects: NamedCache<ProjectsEntry>,
    pub skills: NamedCache<Skill>,
}

impl PortfolioCaches {
    /// Build every named cache from one set of settings
    pub fn init(settings: &CacheSettings) -> Self {
        settings.log_config();
        Self {
            profile: NamedCache::new(PROFILE_CACHE, *settings),
            projects: NamedCache::new(PROJECTS_CACHE, *settings),
            skills: NamedCache::new(SKILLS_CACHE, *settings),
        }
    }

    /// Clear a named cache; `false` for an unknown name
    pub fn evict_all(&self, name: &str) -> bool {
        match name {
            PROFILE_CACHE => self.profile.invalidate_all(),
            PROJECTS_CACHE => self.projects.invalidate_all(),
            SKILLS_CACHE => self.skills.invalidate_all(),
            _ => return false,
        }
        tracing::info!(cache = name, "Cache evicted");
        true
    }

    /// Exact per-cache statistics
    pub async fn stats(&self) -> Vec<CacheStats> {
        self.profile.sync().await;
        self.projects.sync().await;
        self.skills.sync().await;
        vec![
            self.profile.stats(),
            self.projects.stats(),
            self.skills.stats(),
        ]
    }

    /// Drop every entry and log the final statistics
    pub async fn shutdown(&self) {
        for stats in self.stats().await {
            tracing::info!(
                cache = stats.name,
                hits = stats.hits,
                misses = stats.misses,
                entries = stats.entry_count,
                "Cache statistics at shutdown"
            );
        }
        self.profile.invalidate_all();
        self.projects.invalidate_all();
        self.skills.invalidate_all();
    }
}

impl Default for PortfolioCaches {
    fn default() -> Self {
        Self::init(&CacheSettings::default())
    }
}
